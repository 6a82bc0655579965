//! # infra_config
//!
//! System configuration and environment management for ratekit.
//!
//! This crate loads runtime settings (TOML files and environment variables)
//! and defines the defaults for the curve builder, the Hull-White simulator,
//! the BDT calibrator and the thread pool.
//!
//! ## Architecture Position
//!
//! Part of the **I**nfra layer.
//! Must not depend on **P**ricer or **R**untime crates.
//!
//! ## Example
//!
//! ```rust,ignore
//! use infra_config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Thread pool size: {}", settings.engine.thread_pool_size);
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    BdtConfig, CurveConfig, EngineConfig, GeneralConfig, HullWhiteConfig, Settings,
    DEFAULT_TREASURY_FEED_URL,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BdtConfig, ConfigError, CurveConfig, EngineConfig, GeneralConfig, HullWhiteConfig,
        Settings,
    };
}
