use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use userdir_server::{config::Config, database::ServerDatabase, errors::ServerResult, router, AppState};

#[tokio::main]
async fn main() -> ServerResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userdir_server=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let db = match ServerDatabase::new(&config.database_url, config.max_connections).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            tracing::error!(%e, url = %config.database_url, "Failed to initialize database");
            return Err(e.into());
        }
    };

    if let Err(e) = db.run_migrations().await {
        tracing::error!(%e, "Failed to run migrations");
        return Err(e);
    }

    let app = router(Arc::new(AppState {
        db,
        total_on_page: config.total_on_page,
    }));

    tracing::info!(
        addr = %config.bind_address,
        total_on_page = config.total_on_page,
        "Starting user directory server"
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
