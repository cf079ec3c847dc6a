pub mod config;
pub mod models;
pub mod response;

pub use models::http_error::Result;
pub use models::{status_code_of, ErrorBody, HttpError};
pub use response::{write_anyhow_error, write_error, write_json};
