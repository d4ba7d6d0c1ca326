use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde_json::json;
use tracing::error;

// Anyhow error handling with axum
// https://github.com/tokio-rs/axum/blob/d3112a40d55f123bc5e65f995e2068e245f12055/examples/anyhow-error-response/src/main.rs
#[derive(Debug)]
pub enum AppError {
    InternalServerError(anyhow::Error),
    /// The metric backend could not be reached or answered garbage.
    BadGateway(anyhow::Error),
    NotFound(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InternalServerError(error) => {
                error!("Internal Server Error: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal Server Error" })),
                )
                    .into_response()
            }
            AppError::BadGateway(error) => {
                error!("Bad Gateway: {}", error);
                (StatusCode::BAD_GATEWAY, Json(json!({ "status": "error" }))).into_response()
            }
            AppError::NotFound(error) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": error.to_string() }))).into_response()
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}

impl AppError {
    pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Self {
        Self::InternalServerError(err.into())
    }

    pub fn bad_gateway(err: impl Into<anyhow::Error>) -> Self {
        Self::BadGateway(err.into())
    }

    pub fn not_found(err: impl Into<anyhow::Error>) -> Self {
        Self::NotFound(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricError;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_bad_gateway_body() {
        let response =
            AppError::bad_gateway(MetricError::AllFetchesFailed("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], br#"{"status":"error"}"#);
    }

    #[test]
    fn test_from_error_is_internal() {
        let err: AppError = std::io::Error::other("disk").into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
