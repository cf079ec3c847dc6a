use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::error::Error;

use crate::models::error_body::ErrorBody;
use crate::models::http_error::{find_http_error, FALLBACK_MESSAGE, FALLBACK_STATUS};

const JSON_CONTENT_TYPE: &str = "application/json";
const ENCODING_FAILURE_MESSAGE: &str = "Error encoding JSON response";

/// Serializes `payload` as the JSON body of a response with `status`.
///
/// The payload is encoded before anything else is decided, so a failure turns
/// the whole response into a plain-text 500 instead of a half-written one.
pub fn write_json<T>(status: StatusCode, payload: &T) -> Response
where
    T: Serialize + ?Sized,
{
    match serde_json::to_vec(payload) {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            response
        }
        Err(err) => {
            tracing::error!("Failed to encode JSON response: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, ENCODING_FAILURE_MESSAGE).into_response()
        }
    }
}

/// Answers `err` with a `{code, message}` JSON body.
///
/// Only an `HttpError` somewhere in the chain gets its own status and message
/// through. Anything else becomes a generic 500 and is only logged.
pub fn write_error(err: Option<&(dyn Error + 'static)>) -> Response {
    let Some(err) = err else {
        return StatusCode::OK.into_response();
    };

    match find_http_error(err) {
        Some(http_error) => {
            tracing::debug!(code = http_error.code().as_u16(), "{}", err);
            write_json(http_error.code(), &ErrorBody::from(http_error))
        }
        None => {
            tracing::error!("Unhandled error: {}", err);
            write_json(
                FALLBACK_STATUS,
                &ErrorBody {
                    code: FALLBACK_STATUS.as_u16(),
                    message: FALLBACK_MESSAGE.to_string(),
                },
            )
        }
    }
}

pub fn write_anyhow_error(err: &anyhow::Error) -> Response {
    let err: &(dyn Error + 'static) = err.as_ref();
    write_error(Some(err))
}
