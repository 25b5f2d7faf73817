use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

/// Uniform response envelope. Every endpoint, success or failure, returns
/// `{success, message, ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
}

/// Caller-visible failure taxonomy. Validation and conflict are the caller's
/// to fix; authentication means re-authenticate; storage and upstream are
/// surfaced as generic failures with the source kept server-side.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Authentication(String),
    #[error("Internal server error")]
    Storage(#[source] anyhow::Error),
    #[error("Movie catalog is unavailable")]
    Upstream(#[source] anyhow::Error),
    #[error("Too many requests, please try again later")]
    RateLimited,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            // The register endpoint reports conflicts as 400 alongside
            // validation failures; the message tells them apart.
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            ApiError::Storage(source) => error!(error = %source, "storage failure"),
            ApiError::Upstream(source) => error!(error = %source, "catalog upstream failure"),
            _ => {}
        }
        let body = Envelope {
            success: false,
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Storage(e.into())
    }
}

/// `Json` body extractor that reports rejections through the uniform envelope
/// instead of axum's plain-text 422 default. The serde detail stays in the
/// server log.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                warn!(error = %rejection, "request body rejected");
                Err(ApiError::Validation("Invalid request body".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Authentication("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Storage(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn storage_error_hides_internal_detail() {
        let err = ApiError::Storage(anyhow::anyhow!("connection refused by 10.0.0.3"));
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[derive(Debug, serde::Deserialize)]
    struct EchoBody {
        name: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body))
            .expect("request")
    }

    #[tokio::test]
    async fn api_json_parses_valid_body() {
        let ApiJson(body) = ApiJson::<EchoBody>::from_request(json_request(r#"{"name":"alice"}"#), &())
            .await
            .expect("parse");
        assert_eq!(body.name, "alice");
    }

    #[tokio::test]
    async fn api_json_maps_rejection_to_validation() {
        let err = ApiJson::<EchoBody>::from_request(json_request("not json"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        // No serde detail reaches the caller.
        assert_eq!(err.to_string(), "Invalid request body");
    }

    #[test]
    fn envelope_serialization() {
        let body = Envelope {
            success: false,
            message: "Invalid token".into(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""success":false"#));
        assert!(json.contains("Invalid token"));
    }
}
