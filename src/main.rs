use clap::Parser;
use maildeck::api::{HttpMailApi, MailApi};
use maildeck::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "maildeck", about = "Terminal dashboard for a mail-sending backend")]
struct Args {
    /// Backend API base URL (persisted to the config file)
    #[arg(short, long)]
    backend_url: Option<String>,

    /// Emails per page in the sent view
    #[arg(short, long)]
    page_size: Option<u32>,

    /// Probe the backend's /test endpoint, print the response, and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to maildeck.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("maildeck.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let mut file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("maildeck: {e}");
            return ExitCode::FAILURE;
        }
    };

    // A URL given on the command line is remembered for next time.
    if let Some(url) = &args.backend_url {
        config::save_backend_url(&mut file_config, url);
    }

    let resolved = config::resolve(
        &file_config,
        args.backend_url.as_deref(),
        args.page_size,
    );
    log::info!("Maildeck starting up, backend: {}", resolved.backend_url);

    if args.check {
        let api = HttpMailApi::new(resolved.backend_url.clone());
        return match api.test_connection().await {
            Ok(body) => {
                println!("{}: {}", resolved.backend_url, body);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("connection test failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match maildeck::tui::run(resolved) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("maildeck: terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}
