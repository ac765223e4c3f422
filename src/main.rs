use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::time::MissedTickBehavior;
use tracing::info;

use simwatch::data::duration::{format_duration, parse_duration};
use simwatch::{
    logging, ConsoleNotifier, DeviceSource, FileSource, Monitor, MonitorConfig, Notifier,
    Overrides, StateStore, StatusSource, TelegramNotifier,
};

#[derive(Parser, Debug)]
#[command(name = "simwatch")]
#[command(about = "Polls a SIM bank status page and sends debounced Telegram alerts")]
#[command(version)]
struct Args {
    /// TOML configuration file (values may also come from SIMWATCH_* variables)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// State file carried between runs
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Device port to watch
    #[arg(short, long)]
    port: Option<u16>,

    /// Minimum down time before alerting (e.g., "2m", "90s")
    #[arg(short, long)]
    grace_period: Option<String>,

    /// Print notifications instead of sending them, and do not save state
    #[arg(long)]
    dry_run: bool,

    /// Keep running, one cycle per interval (e.g., "1m"), until Ctrl-C
    #[arg(short, long, conflicts_with = "print_state")]
    interval: Option<String>,

    /// Read the status page from a local HTML file instead of the device
    #[arg(long)]
    page_file: Option<PathBuf>,

    /// Print the persisted state as JSON and exit
    #[arg(long)]
    print_state: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let overrides = Overrides {
        port: args.port,
        grace_period: args.grace_period.clone(),
        state_path: args.state.clone(),
    };
    let config = MonitorConfig::load(args.config.as_deref(), &overrides)?;

    // Handle print-state mode (no logging, no network)
    if args.print_state {
        return print_state(&config);
    }

    logging::init(config.log_path.as_deref());

    let interval = args
        .interval
        .as_deref()
        .map(parse_duration)
        .transpose()
        .context("Invalid --interval")?
        .filter(|interval| !interval.is_zero());

    let monitor = build_monitor(&config, &args)?;

    match interval {
        Some(interval) => run_every(&monitor, interval).await,
        None => {
            monitor.run_cycle().await;
        }
    }

    Ok(())
}

/// Wire the configured source and notifier into a monitor.
fn build_monitor(config: &MonitorConfig, args: &Args) -> Result<Monitor> {
    let source: Box<dyn StatusSource> = match &args.page_file {
        Some(path) => Box::new(FileSource::new(path)),
        None => {
            config.ensure_device()?;
            Box::new(DeviceSource::from_config(config).context("Failed to build device client")?)
        }
    };

    let notifier: Box<dyn Notifier> = if args.dry_run {
        Box::new(ConsoleNotifier)
    } else {
        config.ensure_telegram()?;
        Box::new(TelegramNotifier::from_config(config).context("Failed to build Telegram client")?)
    };

    info!(
        source = source.description(),
        port = config.port,
        grace_period = %format_duration(config.grace_period),
        dry_run = args.dry_run,
        "Monitor ready"
    );

    Ok(Monitor::new(
        source,
        notifier,
        StateStore::new(&config.state_path),
        config.policy(),
        config.port,
    )
    .dry_run(args.dry_run))
}

/// Run cycles on a fixed tick until Ctrl-C. A cycle is always finished
/// before the next tick is taken.
async fn run_every(monitor: &Monitor, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval = %format_duration(interval), "Polling until interrupted");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                monitor.run_cycle().await;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping");
                break;
            }
        }
    }
}

fn print_state(config: &MonitorConfig) -> Result<()> {
    let state = StateStore::new(&config.state_path).load();
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
