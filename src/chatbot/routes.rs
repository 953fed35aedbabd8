//! REST endpoints for server-hosted chat sessions.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use super::sessions::SessionStore;
use crate::error::SessionError;

/// Shared state for chat session routes.
#[derive(Clone)]
pub struct ChatRouteState {
    pub sessions: Arc<SessionStore>,
}

/// Body of `POST /api/chat/sessions/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub text: String,
}

fn not_found(e: SessionError) -> Response {
    tracing::debug!("{e}");
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "Session not found"})),
    )
        .into_response()
}

/// POST /api/chat/sessions
async fn create_session(State(state): State<ChatRouteState>) -> Response {
    let session = state.sessions.create().await;
    (StatusCode::CREATED, Json(session.view().await)).into_response()
}

/// GET /api/chat/sessions/{id}
async fn get_session(State(state): State<ChatRouteState>, Path(id): Path<Uuid>) -> Response {
    match state.sessions.get(id).await {
        Ok(session) => Json(session.view().await).into_response(),
        Err(e) => not_found(e),
    }
}

/// POST /api/chat/sessions/{id}/messages
///
/// Responds once the turn's immediate replies are in the transcript; AI
/// answers and submission outcomes show up on a later fetch.
async fn post_message(
    State(state): State<ChatRouteState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MessageRequest>,
) -> Response {
    match state.sessions.get(id).await {
        Ok(session) => Json(session.handle_input(&req.text).await).into_response(),
        Err(e) => not_found(e),
    }
}

/// DELETE /api/chat/sessions/{id}
async fn delete_session(State(state): State<ChatRouteState>, Path(id): Path<Uuid>) -> Response {
    match state.sessions.remove(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => not_found(e),
    }
}

/// Build the chat session routes.
pub fn chat_routes(state: ChatRouteState) -> Router {
    Router::new()
        .route("/api/chat/sessions", post(create_session))
        .route(
            "/api/chat/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route("/api/chat/sessions/{id}/messages", post(post_message))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::chatbot::collaborators::Unconfigured;

    fn app() -> Router {
        let sessions = Arc::new(SessionStore::new(
            Arc::new(Unconfigured),
            Arc::new(Unconfigured),
            Duration::from_secs(60),
        ));
        chat_routes(ChatRouteState { sessions })
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn create(app: &Router) -> (StatusCode, Value) {
        send(app, Request::post("/api/chat/sessions").body(Body::empty()).unwrap()).await
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_returns_greeting() {
        let app = app();
        let (status, body) = create(&app).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["state"], "greeting");
        assert_eq!(body["messages"][0]["sender"], "bot");
        assert_eq!(body["messages"][0]["text"], "Hello 👋");
        assert!(body.get("project_options").is_none());
    }

    #[tokio::test]
    async fn messages_advance_the_conversation() {
        let app = app();
        let (_, created) = create(&app).await;
        let id = created["id"].as_str().unwrap().to_string();
        let uri = format!("/api/chat/sessions/{id}/messages");

        let (status, body) = send(&app, post_json(&uri, json!({"text": "hi"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "freeform");

        send(&app, post_json(&uri, json!({"text": "start project"}))).await;
        let (_, body) = send(&app, post_json(&uri, json!({"text": "A"}))).await;
        assert_eq!(body["state"], "collecting_name");
        let last = body["messages"].as_array().unwrap().last().unwrap().clone();
        assert_eq!(last["text"], "❌ Please enter a valid name (at least 2 characters).");

        let (_, fetched) = send(
            &app,
            Request::get(format!("/api/chat/sessions/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(fetched["messages"], body["messages"]);
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let app = app();
        let id = Uuid::new_v4();

        let (status, body) = send(
            &app,
            Request::get(format!("/api/chat/sessions/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Session not found");

        let (status, _) = send(
            &app,
            post_json(&format!("/api/chat/sessions/{id}/messages"), json!({"text": "hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_removes_session() {
        let app = app();
        let (_, created) = create(&app).await;
        let uri = format!("/api/chat/sessions/{}", created["id"].as_str().unwrap());

        let (status, _) = send(&app, Request::delete(&uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Request::delete(&uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
