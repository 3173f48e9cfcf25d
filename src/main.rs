use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::settings::Config;
use configuration::{ConfigArgs, init_tracing, load_config};
use reporting::{ReportAssembler, ReportModel};
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use watcher::MetricsWatcher;
use web_server::shutdown_signal;

/// The main entry point for the equity watch services.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let config = load_config(&cli.config.config)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Watch => {
            let _guards = init_tracing("watcher", &config.paths.log_dir)?;
            handle_watch(&config).await;
        }
        Commands::Serve => {
            let _guards = init_tracing("web-server", &config.paths.log_dir)?;
            web_server::run_server(&config, shutdown_signal()).await?;
        }
        Commands::Report(args) => handle_report(&config, &args)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Risk and performance statistics for a single trading account.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the account-state file and maintain the derived metrics.
    Watch,
    /// Serve the report to the display layer.
    Serve,
    /// Assemble the report once and print it.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Print the raw JSON read model instead of tables.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Runs the watcher until a termination signal arrives. The signal only
/// cancels the wait between cycles, so a metrics write always completes.
async fn handle_watch(config: &Config) {
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_cancel.cancel();
    });

    MetricsWatcher::new(config).run(cancel).await;
}

fn handle_report(config: &Config, args: &ReportArgs) -> anyhow::Result<()> {
    let report = ReportAssembler::new(config).assemble();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", summary_table(&report));
    if !report.trades.is_empty() {
        println!("{}", trades_table(&report));
    }
    Ok(())
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn pct(value: Decimal) -> String {
    format!("{:.2}%", value)
}

fn summary_table(report: &ReportModel) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Equity".to_string(), money(report.equity)]);
    table.add_row(vec!["Cash".to_string(), money(report.cash)]);
    table.add_row(vec!["Invested".to_string(), money(report.invested)]);
    table.add_row(vec!["Last Equity".to_string(), money(report.last_equity)]);
    if let Some(price) = report.price {
        table.add_row(vec!["Price".to_string(), price.to_string()]);
    }
    table.add_row(vec!["High-Water-Mark".to_string(), money(report.high_water_mark)]);
    table.add_row(vec!["Max Drawdown".to_string(), pct(report.max_dd)]);
    table.add_row(vec!["Sharpe".to_string(), format!("{:.3}", report.sharpe)]);
    table.add_row(vec!["Daily".to_string(), pct(report.daily_pct)]);
    table.add_row(vec!["Total".to_string(), pct(report.total_pct)]);
    table
}

fn trades_table(report: &ReportModel) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Time", "Action", "Price", "Qty", "Cash", "Shares", "Equity"]);
    for trade in &report.trades {
        table.add_row(vec![
            trade.timestamp.format(core_types::LEDGER_TIMESTAMP_FORMAT).to_string(),
            trade.action.clone().unwrap_or_default(),
            trade.price.to_string(),
            trade.qty.map(|q| q.to_string()).unwrap_or_default(),
            money(trade.cash_available),
            trade.shares_held.to_string(),
            trade.equity().map(money).unwrap_or_default(),
        ]);
    }
    table
}
