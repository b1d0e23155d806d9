use analytics::{EngineConfig, KpiEngine, KpiRecord, WindowEdge};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use configuration::{Settings, SettingsOverrides};
use core_types::{RawSnapshot, RequestedWindow, TimeWindow, TradeSnapshot};
use database::DbRepository;
use std::path::{Path, PathBuf};

/// The main entry point for the Finactical KPI service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments use the environment directly.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut settings = configuration::load_settings(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;

    match cli.command {
        Commands::Serve(overrides) => {
            overrides.apply(&mut settings);
            settings.validate()?;
            let _log_guard = configuration::init_tracing(&settings.logging)?;
            web_server::run_server(settings).await
        }
        Commands::Report(args) => {
            let _log_guard = configuration::init_tracing(&settings.logging)?;
            handle_report(args, settings).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Performance and risk KPIs over a trading bot's ledger.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML settings file (optional; environment variables override it).
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(SettingsOverrides),
    /// Compute the KPI record for a window and print it.
    Report(ReportArgs),
}

#[derive(Parser)]
struct ReportArgs {
    /// Inclusive window start (ISO-8601).
    #[arg(long)]
    start: Option<String>,

    /// Inclusive window end (ISO-8601).
    #[arg(long)]
    end: Option<String>,

    /// Read snapshots from a JSON array instead of the configured ledger.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Currency label; defaults to `api.base_currency`.
    #[arg(long)]
    currency: Option<String>,

    /// Print the record as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

async fn handle_report(args: ReportArgs, settings: Settings) -> anyhow::Result<()> {
    let requested = RequestedWindow::new(args.start, args.end);
    let window = requested.bounds();

    let snapshots = match &args.input {
        Some(path) => read_snapshot_file(path, &window)?,
        None => {
            let path = &settings.database.path;
            DbRepository::new(database::connect(&settings.database))
                .load_snapshots(&window)
                .await
                .with_context(|| format!("Failed to read the trade ledger at {}", path.display()))?
        }
    };
    tracing::info!(snapshots = snapshots.len(), "Loaded snapshots for report.");

    let engine = KpiEngine::new(EngineConfig {
        base_currency: args.currency.unwrap_or(settings.api.base_currency),
    });
    let record = engine.calculate(&snapshots, &requested);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", render_table(&record));
    }
    Ok(())
}

/// Reads a JSON array of ledger rows, keeping those inside `window` in
/// chronological order. Rows sharing a timestamp keep their file order.
fn read_snapshot_file(path: &Path, window: &TimeWindow) -> anyhow::Result<Vec<TradeSnapshot>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let rows: Vec<RawSnapshot> = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of snapshots", path.display()))?;

    let mut snapshots: Vec<TradeSnapshot> = rows
        .into_iter()
        .filter(|row| window.contains(row.timestamp))
        .map(TradeSnapshot::from)
        .collect();
    snapshots.sort_by_key(|s| s.timestamp);
    Ok(snapshots)
}

fn render_table(record: &KpiRecord) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);

    let rows = [
        ("Window start", edge(&record.start)),
        ("Window end", edge(&record.end)),
        ("Trades", record.trades_count.to_string()),
        ("Total return", format!("{:.2}%", record.total_return_pct)),
        ("CAGR", format!("{:.2}%", record.cagr_pct)),
        ("Sharpe", format!("{:.3}", record.sharpe)),
        ("Sortino", format!("{:.3}", record.sortino)),
        ("Max drawdown", format!("{:.2}%", record.max_drawdown_pct)),
        ("Max drawdown duration (events)", record.max_dd_duration_days.to_string()),
        ("Win rate", format!("{:.2}%", record.win_rate_pct)),
        ("Profit factor", format!("{:.3}", record.profit_factor)),
        ("Avg trade P&L", format!("{:.2} {}", record.avg_trade_pnl, record.currency)),
        ("Avg daily P&L", format!("{:.2} {}", record.avg_daily_pnl, record.currency)),
        ("Std daily P&L", format!("{:.2} {}", record.std_daily_pnl, record.currency)),
    ];
    for (metric, value) in rows {
        table.add_row(vec![
            Cell::new(metric),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn edge(edge: &Option<WindowEdge>) -> String {
    match edge {
        Some(WindowEdge::Observed(ts)) => {
            core_types::epoch_to_iso(*ts).unwrap_or_else(|_| ts.to_string())
        }
        Some(WindowEdge::Requested(raw)) => raw.clone(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const T0: i64 = 1_704_067_200;

    #[test]
    fn snapshot_file_is_filtered_and_ordered() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"timestamp": {t2}, "usdt": 1100.0}},
                {{"timestamp": {t0}, "usdt": 1000.0, "position": null}},
                {{"timestamp": {t1}, "usdt": 1050.0, "action": "Sell", "pnl": 50.0}},
                {{"timestamp": {late}, "usdt": 9.0}}
            ]"#,
            t0 = T0,
            t1 = T0 + 60,
            t2 = T0 + 120,
            late = T0 + 86_400,
        )
        .unwrap();

        let window = TimeWindow {
            start: Some(T0),
            end: Some(T0 + 3_600),
        };
        let snapshots = read_snapshot_file(file.path(), &window).unwrap();

        let timestamps: Vec<i64> = snapshots.iter().map(|s| s.timestamp).collect();
        assert_eq!(timestamps, vec![T0, T0 + 60, T0 + 120]);
        assert_eq!(snapshots[0].position, 0.0);
        assert!(snapshots[1].is_exit());
        assert_eq!(snapshots[1].realized_pnl, 50.0);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"an array\"}}").unwrap();
        assert!(read_snapshot_file(file.path(), &TimeWindow::default()).is_err());
    }

    #[test]
    fn table_shows_requested_edges_verbatim() {
        let mut record = KpiRecord::new("USD");
        record.start = Some(WindowEdge::Requested("2030-01-01".to_string()));
        record.end = Some(WindowEdge::Observed(T0));
        let rendered = render_table(&record).to_string();
        assert!(rendered.contains("2030-01-01"));
        assert!(rendered.contains("2024-01-01T00:00:00Z"));
    }
}
