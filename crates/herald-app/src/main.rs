use tracing::{error, info};

mod io;
mod run;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // load config: HERALD_CONFIG env > herald.toml in the working directory
    let config_path = std::env::var("HERALD_CONFIG").ok();
    let config = herald_core::HeraldConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        herald_core::HeraldConfig::default()
    });

    info!("herald starting");

    let code = match run::run(config).await {
        Ok(reason) => {
            info!(?reason, "shutting down");
            reason.exit_code()
        }
        Err(e) => {
            error!(code = e.code(), "{e}");
            e.exit_code()
        }
    };
    std::process::exit(code);
}
