//! svcwatch daemon entry point.

use clap::Parser;
use svcwatch::config::{Config, Strategy};
use svcwatch::error::Result;
use svcwatch::restart::{SystemctlRestarter, ThrottledActuator};
use svcwatch::source::{EventWatcher, HashPoller};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() {
    let config = Config::parse();
    if let Err(err) = config.validate() {
        eprintln!("{err}");
        std::process::exit(1);
    }
    init_logging(&config);

    if let Err(err) = run(config).await {
        error!(%err, "fatal");
        std::process::exit(1);
    }
}

fn init_logging(config: &Config) {
    // validate() already checked the level parses.
    let level = config.level().unwrap_or(tracing::Level::INFO);
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(config: Config) -> Result<()> {
    info!("running...");

    let restarter =
        SystemctlRestarter::new(config.service.as_str()).with_timeout(config.restart_timeout);
    let mut actuator = ThrottledActuator::new(restarter, config.throttle);

    // One forced restart up front: a fresh process establishes the desired
    // state before it starts reacting to changes. In poll mode the first
    // tick fires as well and normally lands inside the throttle window.
    actuator.trigger().await;

    match config.strategy {
        Strategy::Poll => {
            HashPoller::new(&config.config_path, config.poll_interval)
                .run(&mut actuator)
                .await?;
        }
        Strategy::Notify => {
            EventWatcher::subscribe(&config.config_path)?
                .run(&mut actuator)
                .await?;
        }
    }

    info!("successful.");
    Ok(())
}
