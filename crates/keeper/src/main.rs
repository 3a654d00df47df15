use std::time::Duration;

use clap::Parser;
use elastic_core::RebaseOutcome;
use tokio::time;

use elastic_keeper::{config, FilePriceFeed, KeeperConfig, KeeperError};

#[derive(Parser, Debug)]
#[command(name = "elastic-keeper")]
#[command(about = "Drives periodic elastic-supply rebase attempts from a price feed")]
struct Args {
    /// Path to keeper configuration file
    #[arg(short, long, default_value = "keeper.toml")]
    config: String,

    /// Write a starting-point configuration file and exit
    #[arg(long)]
    init_config: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), KeeperError> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    if args.init_config {
        config::write_example_config(&args.config)?;
        log::info!("Wrote starting-point configuration to {}", args.config);
        return Ok(());
    }

    let config = KeeperConfig::load(&args.config)?;

    log::info!("Starting elastic-supply keeper");
    log::info!("Price feed: {}", config.feed.path);
    log::info!("Tick interval: {}s", config.tick_interval);

    let feed = FilePriceFeed::new(&config.feed.path, config.feed_max_age());
    let mut engine = config.build_engine()?;

    log::info!(
        "Engine initialized: supply {}, target price {}, rebase interval {}s",
        engine.total_supply(),
        engine.params().target_price(),
        engine.params().rebase_interval()
    );

    let mut ticker = time::interval(Duration::from_secs(config.tick_interval));
    let mut iteration = 0u64;

    loop {
        ticker.tick().await;
        iteration += 1;

        let now = chrono::Utc::now().timestamp();
        match engine.attempt_rebase(&feed, now) {
            Ok(RebaseOutcome::Applied(event)) => {
                log::info!(
                    "Iteration {}: rebase applied, supply {} -> {} (delta {})",
                    iteration,
                    event.supply_before,
                    event.supply_after,
                    event.delta
                );
            }
            Ok(outcome) => {
                log::debug!("Iteration {}: no rebase ({:?})", iteration, outcome);
            }
            Err(e) => {
                // Keep running; the next tick retries naturally.
                log::error!("Iteration {}: rebase attempt failed: {}", iteration, e);
            }
        }

        if iteration % 100 == 0 {
            log::info!(
                "Keeper health: iteration {}, supply {}, {} rebases recorded",
                iteration,
                engine.total_supply(),
                engine.recorder().len()
            );
        }
    }
}
