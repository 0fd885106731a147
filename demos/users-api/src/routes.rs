//! Route assembly: the same business function wired with different
//! adapter configurations.

use std::sync::Arc;

use apikit::{handler, handler_with, CatalogTranslator, HandlerConfig};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use http::StatusCode;
use tower_http::trace::TraceLayer;

use crate::domain::Store;
use crate::handlers;

pub fn router(store: Arc<Store>) -> Router {
    // Default config: locale from Accept-Language, success code 0.
    let register = post(handler(handlers::register));

    // Fixed translators, regardless of what the client sends.
    let register_en = post(handler_with(
        HandlerConfig::default().with_translator(CatalogTranslator::new("en")),
        handlers::register,
    ));
    let register_zh = post(handler_with(
        HandlerConfig::default().with_translator(CatalogTranslator::new("zh")),
        handlers::register,
    ));

    // Locale from a `lang` query parameter instead of the header.
    let register_custom = post(handler_with(
        HandlerConfig::default().with_locale_fn(|parts| {
            parts
                .uri
                .query()
                .and_then(|q| q.split('&').find_map(|p| p.strip_prefix("lang=")))
                .filter(|lang| !lang.is_empty())
                .unwrap_or("zh")
                .to_owned()
        }),
        handlers::register,
    ));

    // Creation reports its own business code, returns 201, and logs every
    // bound request.
    let create = handler_with(
        HandlerConfig::default()
            .with_success_code(20100)
            .with_success_status(StatusCode::CREATED)
            .with_request_logger(|parts, req| {
                tracing::info!(method = %parts.method, uri = %parts.uri, request = ?req, "inbound request");
            }),
        handlers::create_user,
    );

    Router::new()
        .route("/register", register)
        .route("/register/en", register_en)
        .route("/register/zh", register_zh)
        .route("/register/custom", register_custom)
        .route("/users", post(create).get(handler(handlers::list_users)))
        .route(
            "/users/{id}",
            get(handler(handlers::get_user))
                .put(handler(handlers::update_user))
                .delete(handler(handlers::delete_user)),
        )
        .layer(Extension(store))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = router.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn app() -> Router {
        router(Arc::new(Store::default()))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn register_succeeds_with_valid_payload() {
        let (status, body) = send(
            app(),
            post_json(
                "/register",
                json!({"username": "ferris", "email": "ferris@crates.io", "age": 25}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["user_id"], 12345);
    }

    #[tokio::test]
    async fn register_en_route_forces_english_messages() {
        let (status, body) = send(
            app(),
            post_json("/register/en", json!({"username": "ab"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Parameter binding failed");
        assert!(body["errors"].as_array().is_some());
    }

    #[tokio::test]
    async fn register_custom_route_reads_lang_query() {
        let (_, body) = send(
            app(),
            post_json("/register/custom?lang=en", json!({"username": "ab"})),
        )
        .await;
        assert_eq!(body["message"], "Parameter binding failed");

        let (_, body) = send(
            app(),
            post_json("/register/custom", json!({"username": "ab"})),
        )
        .await;
        assert_eq!(body["message"], "参数绑定失败");
    }

    #[tokio::test]
    async fn create_get_delete_round_trip() {
        let app = app();
        let (status, body) = send(
            app.clone(),
            post_json(
                "/users",
                json!({"email": "a@x.io", "display_name": "Anna"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_u64().unwrap();

        let (status, body) = send(
            app.clone(),
            Request::builder()
                .uri(format!("/users/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "a@x.io");

        let (status, body) = send(
            app.clone(),
            Request::builder()
                .method("DELETE")
                .uri(format!("/users/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({"id": id, "deleted": true}));

        let (status, body) = send(
            app,
            Request::builder()
                .uri(format!("/users/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 40401);
    }

    #[tokio::test]
    async fn duplicate_email_maps_to_conflict() {
        let app = app();
        let payload = json!({"email": "a@x.io", "display_name": "Anna"});
        let (status, _) = send(app.clone(), post_json("/users", payload.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(app, post_json("/users", payload)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 40901);
        assert_eq!(body["message"], "user with email 'a@x.io' already exists");
    }
}
