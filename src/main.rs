use aurora::core::agent::Provider;
use aurora::core::config::{self, AuroraConfig, CliOverrides};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "aurora", version, about = "Agent configuration and chat, in the terminal")]
struct Args {
    /// Simulated provider to start with (overrides config file and AURORA_PROVIDER)
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// Model to start with; must belong to the provider
    #[arg(short, long)]
    model: Option<String>,

    /// Delay before the simulated reply arrives, in milliseconds
    #[arg(long)]
    reply_delay_ms: Option<u64>,

    /// Start with the configuration sidebar hidden
    #[arg(long)]
    no_sidebar: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to aurora.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("aurora.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {e}. Using defaults.");
        log::warn!("Config load failed: {}", e);
        AuroraConfig::default()
    });

    let cli = CliOverrides {
        provider: args.provider,
        model: args.model,
        reply_delay_ms: args.reply_delay_ms,
        no_sidebar: args.no_sidebar,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Aurora starting up: provider={:?} model={:?} reply_delay={:?}",
        resolved.provider,
        resolved.model,
        resolved.reply_delay
    );

    aurora::tui::run(resolved)
}
