use std::net::SocketAddr;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracker::api::router;
use tracker::config::Config;
use tracker::db;
use tracker::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "tracker=debug,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load();

    let pool = db::connect_lazy(&config.database_url)?;

    // An unreachable store is not fatal here; requests report it as 500 until it comes back.
    match db::migrate(&pool).await {
        Ok(()) => info!("database connected"),
        Err(e) => error!("database connection failed: {}", e),
    }

    let state = AppState {
        db: pool,
        api_token: config.api_token.clone(),
    };

    let app = router(state);

    let addr = SocketAddr::new(config.host, config.port);
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
