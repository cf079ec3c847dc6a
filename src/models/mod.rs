pub mod error_body;
pub mod http_error;

pub use error_body::ErrorBody;
pub use http_error::{find_http_error, status_code_of, HttpError};
