mod catch_panic;
mod requests_logging;

pub use catch_panic::handle_panic;
pub use requests_logging::{log_requests, RequestsLoggingLevel};
