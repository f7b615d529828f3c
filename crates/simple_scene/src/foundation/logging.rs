//! Logging utilities and structured logging support
//!
//! The library only emits records through the `log` facade. Binaries pick
//! the backend by calling one of the initializers below once at startup.

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, falling back to `default_level` when
/// `RUST_LOG` is not set
///
/// Returns `false` if a logger was already installed.
pub fn init_with_level(default_level: &str) -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init()
        .is_ok()
}
