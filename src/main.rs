use clap::Parser;
use dotenvy::dotenv;
use tracing::info;
use tracing_appender::rolling;

use paydesk::config::Config;
use paydesk::shell;

/// Clerical payroll desk: enter, edit, filter, and report on monthly
/// employee payroll records held in a remote store.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Base URL of the record store; overrides PAYDESK_API_URL.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }

    // Rolling daily log; the terminal stays free for the prompts.
    let file_appender = rolling::daily(&config.log_dir, "paydesk.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(api_url = %config.api_url, "payroll desk starting");

    shell::run(&config)
}
