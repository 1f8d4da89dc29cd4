// src/main.rs — twelve-angry-llms entry point

use clap::Parser;

use twelve_angry_llms::cli::{eval, Cli};
use twelve_angry_llms::infra::config::Config;
use twelve_angry_llms::infra::logger;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    logger::init_logging(level);

    eval::run_command(&cli.command, &config).await
}
