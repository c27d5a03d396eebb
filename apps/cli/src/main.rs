mod args;

use std::io;

use app_api::AppContext;
use http_api::HttpState;
use tracing_subscriber::{EnvFilter, fmt};
use tracker_app::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let args = args::parse_args().map_err(|err| {
        eprintln!("{err}");
        args::print_help();
        io::Error::new(io::ErrorKind::InvalidInput, "invalid arguments")
    })?;

    let load = AppConfig::load(args.config.as_deref()).map_err(io::Error::other)?;
    match &load.file {
        Some(file) => tracing::info!(file = %file.display(), "loaded config"),
        None => tracing::info!("no config file found, using defaults and environment"),
    }

    let mut config = load.config;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = AppState::new(config).map_err(io::Error::other)?;
    app_state.initialize().map_err(io::Error::other)?;

    let router = http_api::router(HttpState::new(AppContext::new(app_state)));

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        %local_addr,
        version = env!("CARGO_PKG_VERSION"),
        "email tracker listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("email tracker stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
