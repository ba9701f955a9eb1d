//! Terminal front-end: draws each generation's changes at a fixed cadence.

mod renderer;
mod telemetry;

use anyhow::{Context, Result};
use life_core::ConsoleConfig;
use life_world::Simulation;
use renderer::{ConsoleRenderer, TerminalGuard};
use std::io::{self, Stdout};
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

const CONFIG_ENV: &str = "LIFE_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;

    telemetry::init_logging(&config.log_filter, config.log_file.as_deref())?;

    let mut sim_config = config.simulation.clone();
    if config.fit_to_terminal {
        match crossterm::terminal::size() {
            // Keep the last row free so writing the bottom-right cell can't scroll
            Ok((cols, rows)) if cols > 0 && rows > 1 => {
                sim_config.world.width = i32::from(cols);
                sim_config.world.height = i32::from(rows - 1);
            }
            Ok(_) => {}
            Err(e) => error!("Could not read terminal size, using configured size: {}", e),
        }
    }

    info!(
        width = sim_config.world.width,
        height = sim_config.world.height,
        rule = ?sim_config.world.rule,
        "Starting Game of Life"
    );

    let mut simulation = Simulation::new(sim_config)?;

    let guard = TerminalGuard::enter().context("failed to prepare terminal")?;
    let mut renderer = ConsoleRenderer::new(io::stdout());
    let result = run_loop(&mut simulation, &mut renderer, &config).await;
    drop(guard);

    info!(
        generations = simulation.generation(),
        reseeds = simulation.reseed_count(),
        "Shutting down"
    );

    result
}

fn load_config() -> Result<ConsoleConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok());

    match path {
        Some(path) => ConsoleConfig::from_json_file(&path)
            .with_context(|| format!("failed to load config from {}", path)),
        None => Ok(ConsoleConfig::default()),
    }
}

async fn run_loop(
    simulation: &mut Simulation,
    renderer: &mut ConsoleRenderer<Stdout>,
    config: &ConsoleConfig,
) -> Result<()> {
    let mut ticker = interval(Duration::from_millis(config.frame_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        if let Some(max) = config.max_generations {
            if simulation.generation() >= max {
                info!("Reached {} generations", max);
                return Ok(());
            }
        }

        tokio::select! {
            _ = ticker.tick() => {
                simulation.step(renderer)?;
                renderer.flush().context("failed to draw generation")?;
            }
            _ = &mut shutdown => {
                return Ok(());
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
