#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use axum_server::tls_rustls::RustlsConfig;
use std::{error::Error, sync::Arc};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use loanOffice::{config::AppConfig, handlers, routes};
use loanOffice::services::{appState, db, mediator::Mediator, redisServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let dotenvResult = dotenvy::dotenv(); //load environment vars, a missing .env is fine

    //Initialize logging. RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    if let Err(err) = dotenvResult {
        tracing::debug!(error = %err, "no .env file loaded");
    }

    let config = AppConfig::fromEnv()?;

    let mut dbState = db::dbState::new();
    dbState.connect(&config.databaseUrl, config.dbMaxConnections).await?;
    dbState.migrateDb().await?;
    let dbPool = dbState.getConnection().ok_or("database pool was not initialised")?.clone();

    let mut redisState = redisServer::redisState::new(config.sessionTtl);
    redisState.connect(&config.redisUrl).await?;

    let mut mediator = Mediator::new();
    handlers::registerAll(&mut mediator, dbPool);

    let appState = appState::AppState::new(mediator, Arc::new(redisState));
    let app = routes::buildRouter(appState);

    match config.tls {
        Some(tls) => {
            let rustlsConfig = RustlsConfig::from_pem_file(&tls.certPath, &tls.keyPath).await?;
            let handle = axum_server::Handle::new();

            let shutdownHandle = handle.clone();
            tokio::spawn(async move {
                shutdownSignal().await;
                shutdownHandle.graceful_shutdown(None);
            });

            tracing::info!(addr = %config.bindAddr, "listening with tls");
            axum_server::bind_rustls(config.bindAddr, rustlsConfig)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        },
        None => {
            tracing::info!(addr = %config.bindAddr, "listening");
            axum::Server::bind(&config.bindAddr)
                .serve(app.into_make_service())
                .with_graceful_shutdown(shutdownSignal())
                .await?;
        }
    }

    tracing::info!("server stopped");
    return Ok(());
}

async fn shutdownSignal() {
    let ctrlC = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrlC => tracing::info!("ctrl+c received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down")
    }
}
