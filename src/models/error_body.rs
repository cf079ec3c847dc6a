use serde::{Deserialize, Serialize};

use crate::models::http_error::HttpError;

/// What a client sees of an error. Only `code` and `message`, never the cause.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

impl From<&HttpError> for ErrorBody {
    fn from(err: &HttpError) -> Self {
        ErrorBody {
            code: err.code().as_u16(),
            message: err.message().to_string(),
        }
    }
}
