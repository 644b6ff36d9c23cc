use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Classifier request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    // body 只寫進 log，不回給 client
    #[error("Classifier returned status {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Malformed classifier response: {message}")]
    MalformedResponse { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl DetectorError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// 上游 (classifier) 出錯時對應的 HTTP 狀態碼
    pub fn status_code(&self) -> StatusCode {
        match self {
            DetectorError::ApiError(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            DetectorError::ApiError(_)
            | DetectorError::UpstreamStatus { .. }
            | DetectorError::MalformedResponse { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DetectorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            DetectorError::UpstreamStatus { body, .. } => {
                tracing::error!("Request failed ({}): {}, body: {}", status, self, body)
            }
            _ => tracing::error!("Request failed ({}): {}", status, self),
        }

        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, DetectorError>;
