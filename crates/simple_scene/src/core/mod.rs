//! # Core Module
//!
//! Shared configuration types used by the asset and mesh subsystems.

pub mod config;

pub use crate::foundation;
pub use crate::assets;

pub use config::{
    ApplicationConfig,
    AssetConfig,
    Config,
    ConfigError,
};
