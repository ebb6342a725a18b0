use {
    axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    thiserror::Error,
};

use crate::api::ErrorBody;

/// Failures surfaced to HTTP callers as `{ "error": "..." }`.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("WhatsApp is not connected")]
    NotConnected,
    #[error("{0}")]
    BadRequest(String),
    /// The messaging client rejected the call; message passed through as-is.
    #[error("{0}")]
    Upstream(String),
}

impl GatewayError {
    pub fn upstream(err: &anyhow::Error) -> Self {
        Self::Upstream(format!("{err:#}"))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotConnected => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            GatewayError::NotConnected.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            GatewayError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::Upstream("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn upstream_message_is_verbatim() {
        let err = anyhow::anyhow!("Evaluation failed: chat not found");
        assert_eq!(
            GatewayError::upstream(&err).to_string(),
            "Evaluation failed: chat not found"
        );

        let chained = anyhow::anyhow!("HTTP 404").context("failed to fetch media");
        assert_eq!(
            GatewayError::upstream(&chained).to_string(),
            "failed to fetch media: HTTP 404"
        );
    }
}
