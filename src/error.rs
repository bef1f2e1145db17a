use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    ConfigError(#[from] config::ConfigError),

    #[error(transparent)]
    SetLoggerError(#[from] log::SetLoggerError),

    #[error("Home Assistant token missing: environment variable {0} is unset or empty")]
    MissingToken(String),

    #[error("Home Assistant error during {action}: {details}")]
    UpstreamStatus {
        action: String,
        status: StatusCode,
        details: String,
    },

    #[error("Service error: {0}")]
    ServiceError(String),
}

impl ApiError {
    #[must_use]
    pub fn service_error(msg: impl Into<String>) -> Self {
        Self::ServiceError(msg.into())
    }

    /// Error message followed by its chain of causes, for showing to users.
    #[must_use]
    pub fn reason(&self) -> String {
        let mut reason = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !reason.contains(&text) {
                reason = format!("{reason}: {text}");
            }
            source = cause.source();
        }

        if matches!(self, Self::ReqwestError(err) if err.is_timeout()) {
            format!("Timed out waiting for Home Assistant ({reason})")
        } else {
            reason
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
