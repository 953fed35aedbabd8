//! REST endpoint for enquiry submissions.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, warn};

use super::dispatch::dispatch_enquiry;
use super::mailer::MailSender;
use super::model::{EnquiryRequest, EnquiryResponse};
use crate::error::{EnquiryError, MailError};

/// Shared state for enquiry routes.
#[derive(Clone)]
pub struct EnquiryRouteState {
    /// Mail relay (None if SMTP is not configured).
    pub mailer: Option<Arc<dyn MailSender>>,
}

/// POST /api/enquiry
///
/// Validates and mails one enquiry. 400 for an unknown type or invalid
/// fields, 500 when the relay fails or is not configured.
async fn submit_enquiry(
    State(state): State<EnquiryRouteState>,
    Json(req): Json<EnquiryRequest>,
) -> (StatusCode, Json<EnquiryResponse>) {
    match dispatch_enquiry(state.mailer.as_deref(), &req).await {
        Ok(_) => (StatusCode::OK, Json(EnquiryResponse::ok())),
        Err(EnquiryError::InvalidType(kind)) => {
            warn!(enquiry_type = %kind, "Rejected enquiry with unknown type");
            (
                StatusCode::BAD_REQUEST,
                Json(EnquiryResponse::failed("Invalid enquiry type")),
            )
        }
        Err(EnquiryError::Validation(e)) => {
            warn!(error = ?e, "Rejected enquiry with invalid fields");
            (
                StatusCode::BAD_REQUEST,
                Json(EnquiryResponse::failed(e.to_string())),
            )
        }
        Err(EnquiryError::Mail(MailError::NotConfigured)) => {
            error!("Enquiry received but SMTP is not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(EnquiryResponse::failed("Failed to send email")),
            )
        }
        Err(e) => {
            error!("Error sending mail: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(EnquiryResponse::failed("Failed to send email")),
            )
        }
    }
}

/// Build the enquiry route.
pub fn enquiry_routes(state: EnquiryRouteState) -> Router {
    Router::new()
        .route("/api/enquiry", post(submit_enquiry))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::enquiry::mailer::EnquiryMail;

    #[derive(Default)]
    struct StubMailer {
        sent: Mutex<Vec<EnquiryMail>>,
        fail: bool,
    }

    #[async_trait]
    impl MailSender for StubMailer {
        async fn send(&self, mail: EnquiryMail) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError::Transport("relay down".into()));
            }
            self.sent.lock().unwrap().push(mail);
            Ok(())
        }
    }

    async fn post_json(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::post("/api/enquiry")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn app_with(mailer: Arc<StubMailer>) -> Router {
        enquiry_routes(EnquiryRouteState {
            mailer: Some(mailer),
        })
    }

    fn contact() -> serde_json::Value {
        serde_json::json!({
            "type": "contact",
            "name": "Asha",
            "email": "asha@x.com",
            "phone": "9876543210",
            "project": "Web Development",
            "message": "Need a site"
        })
    }

    #[tokio::test]
    async fn accepted_enquiry_returns_success() {
        let mailer = Arc::new(StubMailer::default());
        let (status, body) = post_json(app_with(mailer.clone()), contact()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Email sent successfully");
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_type_is_bad_request() {
        let mailer = Arc::new(StubMailer::default());
        let mut body = contact();
        body["type"] = "newsletter".into();
        let (status, body) = post_json(app_with(mailer.clone()), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid enquiry type");
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_phone_is_bad_request() {
        let mailer = Arc::new(StubMailer::default());
        let mut body = contact();
        body["phone"] = "12345".into();
        let (status, body) = post_json(app_with(mailer), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("phone"));
    }

    #[tokio::test]
    async fn relay_failure_is_server_error() {
        let mailer = Arc::new(StubMailer {
            fail: true,
            ..Default::default()
        });
        let (status, body) = post_json(app_with(mailer), contact()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to send email");
    }

    #[tokio::test]
    async fn missing_smtp_config_is_server_error() {
        let app = enquiry_routes(EnquiryRouteState { mailer: None });
        let (status, body) = post_json(app, contact()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn bad_requests_are_rejected_without_smtp_config() {
        let mut unknown = contact();
        unknown["type"] = "newsletter".into();
        let app = enquiry_routes(EnquiryRouteState { mailer: None });
        let (status, body) = post_json(app, unknown).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid enquiry type");

        let mut bad_email = contact();
        bad_email["email"] = "not-an-email".into();
        let app = enquiry_routes(EnquiryRouteState { mailer: None });
        let (status, body) = post_json(app, bad_email).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "❌ That doesn't look like a valid email. Try again:"
        );
    }
}
