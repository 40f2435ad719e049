use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use folio_core::error::FolioError;

/// JSON error for every endpoint, rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("api error: {:#}", err);
        Self::internal(format!("{:#}", err))
    }
}

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        match err {
            FolioError::InvalidInput(msg) => Self::bad_request(msg),
            FolioError::Mail(msg) => {
                tracing::error!("mail error: {}", msg);
                Self::internal(msg)
            }
            e if e.is_upstream() => {
                tracing::warn!("upstream error: {}", e);
                Self::bad_gateway(e.to_string())
            }
            e => {
                tracing::error!("api error: {}", e);
                Self::internal(e.to_string())
            }
        }
    }
}
