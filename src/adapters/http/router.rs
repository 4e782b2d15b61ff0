//! Application router: every route plus the middleware stack.
//!
//! Layer order, outermost first:
//! request id → trace → CORS → timeout → session → route guard → handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderName, HeaderValue, Method, Request,
};
use axum::routing::get;
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domain::access::RouteGuard;
use crate::ports::{AuthGateway, SessionValidator, SubscriptionService};

use super::auth::{auth_router, AuthAppState, SessionCookies};
use super::middleware::{route_guard_middleware, session_middleware, AuthState};
use super::subscription::{subscription_router, SubscriptionAppState};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Everything the routes depend on.
#[derive(Clone)]
pub struct AppComponents {
    pub subscription_service: Arc<dyn SubscriptionService>,
    pub auth_gateway: Arc<dyn AuthGateway>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub route_guard: RouteGuard,
    pub cookies: SessionCookies,
    pub site_url: String,
}

/// Transport settings for the outer layers.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// Routes with session resolution and the route guard, no transport layers.
pub fn build_router(components: AppComponents) -> Router {
    let auth_state = AuthState::new(
        components.session_validator.clone(),
        components.cookies.session_name.clone(),
    );
    let guard = Arc::new(components.route_guard.clone());

    Router::new()
        .merge(auth_router(AuthAppState::new(
            components.auth_gateway.clone(),
            components.cookies.clone(),
            components.site_url.clone(),
        )))
        .merge(subscription_router(SubscriptionAppState::new(
            components.subscription_service.clone(),
        )))
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(guard, route_guard_middleware))
        .layer(middleware::from_fn_with_state(auth_state, session_middleware))
}

/// Fully layered application, as served by `main`.
pub fn build_app(components: AppComponents, settings: &HttpSettings) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router(components)
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(_) if origin == "*" => {
                tracing::warn!("Ignoring wildcard CORS origin");
                None
            }
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
}
