use anyhow::Context;
use clap::Parser;
use snapshare_core::ShareService;
use snapshare_gateway::cli::{Cli, StorageBackendArg};
use snapshare_gateway::{telemetry, App, AppState};
use snapshare_generator::RandomGenerator;
use snapshare_share::ShareRepository;
use snapshare_storage::{InMemoryStore, RedisStore};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _telemetry = telemetry::init(cli.log_format, cli.otlp_endpoint.as_deref())?;

    let cors = cli.cors_policy()?;
    let settings = cli.share_settings();

    let shares: Arc<dyn ShareService> = match cli.storage {
        StorageBackendArg::InMemory => Arc::new(ShareRepository::new(
            Arc::new(InMemoryStore::new()),
            RandomGenerator::new(),
            settings,
        )),
        StorageBackendArg::Redis => {
            let redis_url = cli
                .redis_url
                .as_deref()
                .context("redis url is required when storage backend is redis")?;
            let store = RedisStore::connect(redis_url, cli.redis_key_prefix.clone()).await?;
            Arc::new(ShareRepository::new(
                Arc::new(store),
                RandomGenerator::new(),
                settings,
            ))
        }
    };

    let app = App::router(AppState::new(shares, cli.public_base_url.clone()), cors);

    let listener = tokio::net::TcpListener::bind(cli.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen_addr))?;
    info!(
        listen_addr = %listener.local_addr()?,
        storage_backend = %cli.storage,
        default_ttl_days = cli.default_ttl_days,
        "starting gateway server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
