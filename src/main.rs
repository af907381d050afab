// src/main.rs
use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use pollhub::admin::AdminRegistry;
use pollhub::config::Config;
use pollhub::db::{create_pool, PgRecordStore};
use pollhub::events::Invalidations;
use pollhub::routes::create_routes;
use pollhub::service::PollService;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load();

    let pool = create_pool(&config.database_url)
        .await
        .expect("Failed to connect to the database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let events = Invalidations::new();
    let mut invalidations = events.subscribe();
    // Presentation hook: downstream renderers subscribe the same way.
    tokio::spawn(async move {
        while let Ok(view) = invalidations.recv().await {
            tracing::debug!(?view, "view invalidated");
        }
    });

    let service = PollService::new(
        Arc::new(PgRecordStore::new(pool)),
        Arc::new(AdminRegistry::new(&config.admin_emails)),
        events,
    );
    let app = create_routes(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "listening");
    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .expect("server error");
}
