use std::net::SocketAddr;
use std::sync::Arc;

use jobportal::config::AppConfig;
use jobportal::repository::PgRepository;
use jobportal::services::auth::JwtAuth;
use jobportal::services::PortalServiceImpl;
use jobportal::{db, routes, AppState};
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobportal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env()?;

    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let auth = Arc::new(JwtAuth::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
        config.jwt_token_expiry_secs,
    ));
    let repo = Arc::new(PgRepository::new(pool));
    let service = Arc::new(PortalServiceImpl::new(repo, auth.clone()));
    let state = AppState::new(service, auth);

    let ip: std::net::IpAddr = config.host.parse()?;
    let addr = SocketAddr::from((ip, config.port));
    tracing::info!(host = %addr, "Starting job portal API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, routes::app(state)).await?;

    Ok(())
}
