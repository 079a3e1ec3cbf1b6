//! HTTP middleware

pub mod logging;

pub use logging::{error_logging_middleware, request_logging_middleware};
