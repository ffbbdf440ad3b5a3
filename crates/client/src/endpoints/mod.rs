//! REST API endpoint implementations.

pub mod request;
pub mod search;
pub mod url_encoding;

pub use request::ApiRequest;
pub use search::{
    create_job, delete_job, get_job_status, get_messages, get_page, get_records, job_path,
};
