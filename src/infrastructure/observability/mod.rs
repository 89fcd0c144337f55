//! Observability infrastructure

mod tracing_setup;

pub use tracing_setup::init_logging;
