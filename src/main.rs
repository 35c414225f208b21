//! rookery - IRC bot runner.
//!
//! Usage: `rookery [config.toml]`

use std::time::Duration;

use rookery::config::{self, Config, LogFormat};
use rookery::{Bot, BotManager, network};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// How long running connections get to flush after shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "rookery.toml".to_string());

    // Config is read before logging so its log level can be the fallback.
    let config = Config::load(&config_path);
    let level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_owned());
    let format = config.as_ref().map(|c| c.log_format).unwrap_or_default();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }

    let config = config.map_err(|e| {
        error!(path = %config_path, error = %e, code = e.error_code(), "Failed to load config");
        e
    })?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {}", errors.len(), config_path);
    }

    info!(bots = config.bots.len(), "Starting rookery");

    let manager = BotManager::new();
    for bot_config in &config.bots {
        let path = config.directives_path(bot_config);
        let mut bot = Bot::from_config(bot_config, path.clone());
        match bot.load_directives(&path) {
            Ok(problems) if problems.is_empty() => {}
            Ok(problems) => {
                warn!(bot = %bot_config.name, errors = problems.len(), "Directive file has errors")
            }
            Err(e) => {
                error!(bot = %bot_config.name, file = %path.display(), error = %e, "Failed to read directives");
                continue;
            }
        }
        manager.add(bot)?;
    }

    let mut runners = tokio::task::JoinSet::new();
    for name in manager.names() {
        let Some(handle) = manager.get(&name) else {
            continue;
        };
        runners.spawn(async move {
            if let Err(e) = network::run(name.clone(), handle).await {
                error!(bot = %name, error = %e, code = e.error_code(), "Connection failed");
            }
        });
    }

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Interrupted"),
        _ = async { while runners.join_next().await.is_some() {} } => {
            info!("All connections closed");
        }
    }

    manager.shutdown_all();
    if tokio::time::timeout(SHUTDOWN_GRACE, async {
        while runners.join_next().await.is_some() {}
    })
    .await
    .is_err()
    {
        runners.abort_all();
    }
    info!("Shutdown complete");
    Ok(())
}
