//! SmartScale server binary.

use std::error::Error;
use std::sync::Arc;

use secrecy::Secret;
use tracing_subscriber::EnvFilter;

use smartscale::adapters::auth::{
    GoTrueAuthGateway, GoTrueConfig, JwtSessionValidator, JwtValidatorConfig, MockAuthGateway,
};
use smartscale::adapters::http::auth::SessionCookies;
use smartscale::adapters::http::{build_app, AppComponents, HttpSettings};
use smartscale::adapters::postgres::PostgresSubscriptionStore;
use smartscale::adapters::storage::InMemorySubscriptionStore;
use smartscale::application::StoreSubscriptionService;
use smartscale::config::{
    AppConfig, AuthConfig, AuthProvider, ServerConfig, StoreKind, SubscriptionConfig,
    ValidationError,
};
use smartscale::domain::access::RouteGuard;
use smartscale::ports::{AuthGateway, SessionValidator, SubscriptionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let subscription_service = Arc::new(subscription_service(&config).await?);
    let (auth_gateway, session_validator) = auth_adapters(&config.auth)?;

    let components = AppComponents {
        subscription_service,
        auth_gateway,
        session_validator,
        route_guard: RouteGuard::new(),
        cookies: SessionCookies::new(
            config.auth.session_cookie.clone(),
            config.server.site_url.starts_with("https://"),
        ),
        site_url: config.server.site_url.clone(),
    };
    let settings = HttpSettings {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: config.server.request_timeout(),
    };
    let app = build_app(components, &settings);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "SmartScale listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn subscription_service(config: &AppConfig) -> Result<StoreSubscriptionService, Box<dyn Error>> {
    let SubscriptionConfig {
        store,
        fallback_to_memory,
    } = config.subscription;

    let primary: Arc<dyn SubscriptionStore> = match store {
        StoreKind::Memory => {
            tracing::warn!("Subscriptions are kept in memory and lost on restart");
            Arc::new(InMemorySubscriptionStore::new())
        }
        StoreKind::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or(ValidationError::MissingRequired("SMARTSCALE__DATABASE__URL"))?;
            let pool = database.pool_options().connect(&database.url).await?;
            tracing::info!("Connected to PostgreSQL");

            if database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Migrations applied");
            }
            Arc::new(PostgresSubscriptionStore::new(pool))
        }
    };

    let service = StoreSubscriptionService::new(primary);
    if fallback_to_memory && store == StoreKind::Postgres {
        tracing::warn!("In-memory fallback enabled for subscription store outages");
        return Ok(service.with_fallback(Arc::new(InMemorySubscriptionStore::new())));
    }
    Ok(service)
}

type AuthAdapters = (Arc<dyn AuthGateway>, Arc<dyn SessionValidator>);

fn auth_adapters(config: &AuthConfig) -> Result<AuthAdapters, Box<dyn Error>> {
    match config.provider {
        AuthProvider::Gotrue => {
            let gateway = GoTrueAuthGateway::new(GoTrueConfig {
                base_url: config.base_url.clone(),
                anon_key: Secret::new(config.anon_key.clone()),
                timeout: config.timeout(),
            })?;
            let validator = JwtSessionValidator::new(JwtValidatorConfig {
                secret: Secret::new(config.jwt_secret.clone()),
                audience: config.jwt_audience.clone(),
                issuer: config.jwt_issuer.clone(),
            });
            let gateway: Arc<dyn AuthGateway> = Arc::new(gateway);
            let validator: Arc<dyn SessionValidator> = Arc::new(validator);
            Ok((gateway, validator))
        }
        AuthProvider::Mock => {
            tracing::warn!("Using mock auth provider (demo@smartscale.dev / demo-password)");
            let mock = Arc::new(MockAuthGateway::new().with_demo_account());
            let gateway: Arc<dyn AuthGateway> = mock.clone();
            let validator: Arc<dyn SessionValidator> = mock;
            Ok((gateway, validator))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
