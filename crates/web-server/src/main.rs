use clap::Parser;
use configuration::{ConfigArgs, init_tracing, load_config};

/// Serves the equity report to the display layer.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,
}

// This main function is the entry point when running `cargo run -p web-server`.
// Its only job is to load the configuration and call `run_server` from the crate's library.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = load_config(&cli.config.config)?;
    let _guards = init_tracing("web-server", &config.paths.log_dir)?;

    web_server::run_server(&config, web_server::shutdown_signal()).await
}
