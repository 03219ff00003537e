// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/", get(crate::handlers::login::index_handler))
        .route("/login", post(crate::handlers::login::login_handler))
        .route("/logout", post(crate::handlers::login::logout_handler))
        .route("/session", get(crate::handlers::login::session_handler))
        .route("/health", get(crate::handlers::health::health_handler))

        // Protected by the session gate
        .route("/dashboard", get(crate::handlers::dashboard::dashboard_handler))

        // Admin endpoints (require API key)
        .route("/reload", post(crate::handlers::admin::reload_handler))
        .route("/metrics", get(crate::handlers::metrics::metrics_handler))

        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::tests::create_test_state;
    use crate::models::dashboard::{DashboardResponse, LoginForm};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn login_request(username: &str, password: &str) -> Request<Body> {
        let form = serde_urlencoded::to_string(LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        })
        .unwrap();

        Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap()
    }

    fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_login_then_dashboard_then_logout() {
        let (_dir, state) = create_test_state();
        let app = build_router(state);

        let response = app.clone().oneshot(login_request("Admin", "pw1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(get_with_cookie("/dashboard?product=Saree", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let dashboard: DashboardResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(dashboard.username, "admin");
        assert_eq!(dashboard.selected_product, "Saree");

        let logout = Request::builder()
            .method("POST")
            .uri("/logout")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(logout).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(get_with_cookie("/dashboard", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_dashboard_without_cookie() {
        let (_dir, state) = create_test_state();
        let response = build_router(state)
            .oneshot(get_with_cookie("/dashboard", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_rejections() {
        let (_dir, state) = create_test_state();
        let app = build_router(state);

        let response = app.clone().oneshot(login_request("admin", "wrong")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());

        let response = app.oneshot(login_request("viewer", "pw2")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_public_routes() {
        let (_dir, state) = create_test_state();
        let app = build_router(state);

        let response = app.clone().oneshot(get_with_cookie("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get_with_cookie("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_with_cookie("/missing", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_metrics_requires_key() {
        let (_dir, state) = create_test_state();
        let app = build_router(state);

        let response = app
            .clone()
            .oneshot(get_with_cookie("/metrics?api_key=wrong", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(get_with_cookie("/metrics?api_key=test-api-key", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
