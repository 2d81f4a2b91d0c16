use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;
use crate::accounts;
use crate::messages;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route(
            "/messages",
            post(messages::create_message).get(messages::get_messages),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message)
                .delete(messages::delete_message)
                .patch(messages::update_message),
        )
        .route("/accounts/{account_id}/messages", get(messages::get_account_messages))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use murmur_db::InMemoryStore;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::AppStateInner;

    fn app() -> Router {
        let store = Arc::new(InMemoryStore::new());
        router(Arc::new(AppStateInner::new(store.clone(), store)))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn json_of(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    async fn register(app: &Router, username: &str, password: &str) -> Value {
        let (status, body) = send(
            app,
            Method::POST,
            "/register",
            Some(json!({ "username": username, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        json_of(&body)
    }

    async fn post_message(app: &Router, posted_by: i64, text: &str) -> (StatusCode, Vec<u8>) {
        send(
            app,
            Method::POST,
            "/messages",
            Some(json!({ "postedBy": posted_by, "messageText": text, "timePostedEpoch": 1669947792 })),
        )
        .await
    }

    #[tokio::test]
    async fn register_twice_conflicts() {
        let app = app();
        let account = register(&app, "user", "password").await;
        assert_eq!(account["accountId"], 1);
        assert_eq!(account["username"], "user");

        let (status, body) = send(
            &app,
            Method::POST,
            "/register",
            Some(json!({ "username": "user", "password": "another" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn register_invalid_is_bad_request() {
        let app = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/register",
            Some(json!({ "username": "", "password": "ab" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_outcomes() {
        let app = app();
        let account = register(&app, "user", "password").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/login",
            Some(json!({ "username": "user", "password": "password" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), account);

        let (wrong_password, _) = send(
            &app,
            Method::POST,
            "/login",
            Some(json!({ "username": "user", "password": "nope!" })),
        )
        .await;
        let (unknown_user, _) = send(
            &app,
            Method::POST,
            "/login",
            Some(json!({ "username": "ghost", "password": "password" })),
        )
        .await;
        assert_eq!(wrong_password, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_user, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_message_validation() {
        let app = app();
        let account = register(&app, "user", "password").await;
        let author = account["accountId"].as_i64().unwrap();

        let (status, _) = post_message(&app, author + 100, "hello").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_message(&app, author, &"x".repeat(256)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = post_message(&app, author, &"x".repeat(255)).await;
        assert_eq!(status, StatusCode::OK);
        let message = json_of(&body);
        assert_eq!(message["messageId"], 1);
        assert_eq!(message["postedBy"], author);
        assert_eq!(message["timePostedEpoch"], 1669947792);
    }

    #[tokio::test]
    async fn missing_message_is_empty_ok() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/messages/7", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn delete_then_delete_again() {
        let app = app();
        let account = register(&app, "user", "password").await;
        let (_, body) = post_message(&app, account["accountId"].as_i64().unwrap(), "short-lived").await;
        let id = json_of(&body)["messageId"].as_i64().unwrap();
        let uri = format!("/messages/{id}");

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!(1));

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());

        let (status, body) = send(&app, Method::DELETE, "/messages/999", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn patch_updates_text_only() {
        let app = app();
        let account = register(&app, "user", "password").await;
        let (_, body) = post_message(&app, account["accountId"].as_i64().unwrap(), "before").await;
        let original = json_of(&body);
        let uri = format!("/messages/{}", original["messageId"]);

        let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "messageText": "after" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!(1));

        let (_, body) = send(&app, Method::GET, &uri, None).await;
        let mut expected = original.clone();
        expected["messageText"] = json!("after");
        assert_eq!(json_of(&body), expected);

        let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({ "messageText": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());

        let (status, _) = send(&app, Method::PATCH, "/messages/999", Some(json!({ "messageText": "x" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(json_of(&body), expected);
    }

    #[tokio::test]
    async fn list_endpoints() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/messages", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!([]));

        let (status, body) = send(&app, Method::GET, "/accounts/1/messages", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!([]));

        let first = register(&app, "first", "password").await;
        let second = register(&app, "second", "password").await;
        let first_id = first["accountId"].as_i64().unwrap();
        let second_id = second["accountId"].as_i64().unwrap();
        post_message(&app, first_id, "one").await;
        post_message(&app, second_id, "two").await;
        post_message(&app, first_id, "three").await;

        let (_, body) = send(&app, Method::GET, "/messages", None).await;
        assert_eq!(json_of(&body).as_array().unwrap().len(), 3);

        let (_, body) = send(&app, Method::GET, &format!("/accounts/{first_id}/messages"), None).await;
        let texts: Vec<String> = json_of(&body)
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["messageText"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(texts, vec!["one", "three"]);
    }

    #[tokio::test]
    async fn unreadable_bodies_use_route_status() {
        let app = app();
        let account = register(&app, "user", "password").await;
        let author = account["accountId"].as_i64().unwrap();

        let (status, body) =
            send(&app, Method::POST, "/register", Some(json!({ "username": "other" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());

        let (status, body) = send(&app, Method::POST, "/login", Some(json!({ "username": "user" }))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.is_empty());

        let (status, _) = send(
            &app,
            Method::POST,
            "/messages",
            Some(json!({ "postedBy": author, "messageText": null, "timePostedEpoch": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = post_message(&app, author, "kept").await;
        let uri = format!("/messages/{}", json_of(&body)["messageId"]);
        let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // No body at all, not even a content type
        let (status, _) = send(&app, Method::POST, "/register", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_message_without_timestamp() {
        let app = app();
        let account = register(&app, "user", "password").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/messages",
            Some(json!({ "postedBy": account["accountId"], "messageText": "undated" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let created = json_of(&body);
        assert!(created["timePostedEpoch"].is_null());

        let uri = format!("/messages/{}", created["messageId"]);
        let (_, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(json_of(&body), created);
    }

    #[tokio::test]
    async fn emoji_count_as_two_units() {
        let app = app();
        let account = register(&app, "user", "password").await;
        let author = account["accountId"].as_i64().unwrap();

        let (status, _) = post_message(&app, author, &"😀".repeat(200)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_message(&app, author, &"😀".repeat(127)).await;
        assert_eq!(status, StatusCode::OK);
    }
}
