use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::RevocationRegistry;
use auth::SystemClock;
use identity_service::config::Config;
use identity_service::domain::user::ports::AuthServicePort;
use identity_service::domain::user::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserRepository;
use identity_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let store = match config.database.url {
        Some(_) => "postgresql",
        None => "memory",
    };

    tracing::info!(
        http_port = config.server.http_port,
        store,
        token_ttl_hours = config.jwt.expiration_hours,
        sweep_interval_secs = config.revocation.sweep_interval_secs,
        "Configuration loaded"
    );

    if config.jwt.has_weak_secret() {
        tracing::warn!(
            min_bytes = identity_service::config::MIN_SECRET_BYTES,
            "JWT secret is shorter than recommended"
        );
    }

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::hours(config.jwt.expiration_hours),
    ));
    let revocations = RevocationRegistry::new();
    let clock = Arc::new(SystemClock);

    let auth_service: Arc<dyn AuthServicePort> = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            Arc::new(AuthService::new(
                Arc::new(PostgresUserRepository::new(pg_pool)),
                authenticator,
                revocations,
                clock,
            ))
        }
        None => {
            tracing::warn!("No database configured; users are kept in memory");
            Arc::new(AuthService::new(
                Arc::new(InMemoryUserRepository::new()),
                authenticator,
                revocations,
                clock,
            ))
        }
    };

    let sweeper = Arc::clone(&auth_service);
    let sweep_interval = Duration::from_secs(config.revocation.sweep_interval_secs.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            interval.tick().await;
            let removed = sweeper.sweep_revocations().await;
            if removed > 0 {
                tracing::info!(removed, "Expired revocations purged");
            }
        }
    });

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, create_router(auth_service)).await {
        tracing::error!(error = %e, "Server error");
    }

    Ok(())
}
