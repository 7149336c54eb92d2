use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum Error {
    #[error("store file is corrupt: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("malformed message body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("message log is empty, cannot assign an id")]
    EmptyLog,
    #[error("message ids exhausted, last id is {0}")]
    IdExhausted(i64),
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store worker unavailable: {0}")]
    Blocking(#[from] actix_web::error::BlockingError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Decode(_) => StatusCode::BAD_REQUEST,
            Error::EmptyLog | Error::IdExhausted(_) => StatusCode::CONFLICT,
            Error::Parse(_) | Error::Io(_) | Error::Blocking(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }
        HttpResponse::build(status).json(serde_json::json!({ "error": self.to_string() }))
    }
}
