use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::error::Error;
use std::fmt;

use crate::response::write_error;

pub const FALLBACK_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;
pub const FALLBACK_MESSAGE: &str = "Internal Server Error";

type Cause = Box<dyn Error + Send + Sync + 'static>;

/// An error that knows which HTTP status it should be answered with.
///
/// `message` is sent to the client as is, so it must be safe to expose.
/// `cause` is only ever rendered through `Display` for logs.
#[derive(Debug)]
pub struct HttpError {
    code: StatusCode,
    message: String,
    cause: Option<Cause>,
}

pub type Result<T> = std::result::Result<T, HttpError>;

impl HttpError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        HttpError {
            code,
            message: message.into(),
            cause: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// Builds an error with an explicit status on top of an existing one.
    pub fn wrap(code: StatusCode, message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        HttpError {
            code,
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            None => write!(f, "{}", self.message),
            Some(cause) => write!(f, "{} | root error: {}", self.message, cause),
        }
    }
}

impl Error for HttpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
    }
}

/// Returns the nearest `HttpError` in the source chain of `err`, `err` included.
pub fn find_http_error<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a HttpError> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(http_error) = e.downcast_ref::<HttpError>() {
            return Some(http_error);
        }
        current = e.source();
    }
    None
}

/// 200 when there is no error, the code of the nearest `HttpError` in the
/// chain, 500 for anything else.
pub fn status_code_of(err: Option<&(dyn Error + 'static)>) -> StatusCode {
    match err {
        None => StatusCode::OK,
        Some(err) => find_http_error(err)
            .map(HttpError::code)
            .unwrap_or(FALLBACK_STATUS),
    }
}

impl From<anyhow::Error> for HttpError {
    fn from(err: anyhow::Error) -> Self {
        let found = err
            .chain()
            .find_map(|e| e.downcast_ref::<HttpError>())
            .map(|e| (e.code, e.message.clone()));

        match found {
            Some((code, message)) => HttpError::wrap(code, message, err),
            None => HttpError::wrap(FALLBACK_STATUS, FALLBACK_MESSAGE, err),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        write_error(Some(&self))
    }
}
