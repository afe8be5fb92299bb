//! # TUI Components
//!
//! All UI pieces for the terminal interface live here, one file per
//! component.
//!
//! Two patterns are in use:
//!
//! - **Stateless, props-based**: `TitleBar` receives its data as struct
//!   fields each frame and holds nothing between frames.
//! - **Stateful, event-driven**: `ComposeForm` owns the field buffers and
//!   emits `FormEvent::Submit`; `EmailTable` owns the row highlight;
//!   `DetailModal` owns its scroll offset. Each handles the `TuiEvent`s
//!   the event loop routes to it.
//!
//! Each file co-locates the component's state, event handling, rendering,
//! and tests, so one file tells the whole story of one component.

pub mod compose_form;
pub mod detail_modal;
pub mod email_table;
pub mod field_input;
pub mod title_bar;

pub use compose_form::{ComposeForm, FormEvent};
pub use detail_modal::DetailModal;
pub use email_table::EmailTable;
pub use title_bar::TitleBar;
