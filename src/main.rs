use clap::Parser;
use recrutder_chat::core::config::{self, CliOverrides};
use recrutder_chat::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "recrutder-chat", about = "Recrut'der assistant chat widget")]
struct Args {
    /// Assistant endpoint URL (overrides config and RECRUTDER_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Language code to start in, e.g. "fr" or "ar" (remembered for next time)
    #[arg(short, long)]
    lang: Option<String>,

    /// Path of the page hosting the widget, sent as request context
    #[arg(short, long)]
    page: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to recrutder-chat.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("recrutder-chat.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        config::WidgetConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            endpoint: args.endpoint,
            language: args.lang,
            page: args.page,
        },
    );

    log::info!("Recrut'der chat starting up against {}", resolved.endpoint);

    tui::run(resolved)
}
