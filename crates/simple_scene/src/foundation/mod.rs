//! Foundation module - Core utilities and types
//!
//! - Math type aliases used by the geometry queries
//! - Logging initialization for binaries

pub mod math;
pub mod logging;
