mod log_utils;

pub use log_utils::{TracingConfig, log_init, tracing_init};
pub use tracing::{debug, error, info, trace, warn};

pub mod reexport {
    pub use tracing;
    pub use tracing_subscriber;
}
