//! Route guard middleware.
//!
//! Must run inside `session_middleware`: the guard only looks for the
//! `AuthenticatedUser` extension the session layer leaves behind.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::access::{GuardDecision, RouteGuard};
use crate::domain::foundation::AuthenticatedUser;

pub async fn route_guard_middleware(
    State(guard): State<Arc<RouteGuard>>,
    request: Request,
    next: Next,
) -> Response {
    let has_session = request.extensions().get::<AuthenticatedUser>().is_some();
    let path = request.uri().path();

    match guard.decide(path, has_session) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::RedirectToLogin => {
            tracing::debug!(path, "No session, redirecting to login");
            Redirect::to(guard.login_path()).into_response()
        }
        GuardDecision::RedirectToHome => {
            tracing::debug!(path, "Already signed in, redirecting home");
            Redirect::to(guard.home_path()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header::LOCATION, Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use crate::domain::foundation::UserId;

    fn app(signed_in: bool) -> Router {
        let guard = Arc::new(RouteGuard::new());
        Router::new()
            .route("/dashboard", get(|| async { "dashboard" }))
            .route("/auth/login", get(|| async { "login" }))
            .route("/auth/callback", get(|| async { "callback" }))
            .route("/pricing", get(|| async { "pricing" }))
            .layer(axum::middleware::from_fn_with_state(guard, route_guard_middleware))
            .layer(axum::middleware::from_fn(
                move |mut request: Request, next: Next| async move {
                    if signed_in {
                        request.extensions_mut().insert(AuthenticatedUser::new(
                            UserId::new("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap(),
                            "test@example.com",
                        ));
                    }
                    next.run(request).await
                },
            ))
    }

    async fn get_path(app: Router, path: &str) -> Response {
        app.oneshot(HttpRequest::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn anonymous_dashboard_redirects_to_login() {
        let response = get_path(app(false), "/dashboard").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/auth/login");
    }

    #[tokio::test]
    async fn signed_in_login_page_redirects_home() {
        let response = get_path(app(true), "/auth/login").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/dashboard");
    }

    #[tokio::test]
    async fn callback_is_reachable_while_signed_in() {
        let response = get_path(app(true), "/auth/callback").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn public_pages_pass_through() {
        assert_eq!(get_path(app(false), "/pricing").await.status(), StatusCode::OK);
        assert_eq!(get_path(app(true), "/dashboard").await.status(), StatusCode::OK);
    }
}
