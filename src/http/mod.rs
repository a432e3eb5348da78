//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! catalog routes.

pub mod query;
pub mod response;

// Re-export commonly used types
pub use query::{decode_path_segment, query_param};
pub use response::{apply_common_headers, build_options_response, log_build_error};
