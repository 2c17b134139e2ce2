//! Observability utilities.

mod logging;
mod timer;

pub use logging::{build_env_filter, init_tracing};
pub use timer::FetchTimer;
