//! Settings and configuration structures.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Daily Treasury par yield curve XML endpoint.
pub const DEFAULT_TREASURY_FEED_URL: &str =
    "https://home.treasury.gov/resource-center/data-chart-center/interest-rates/pages/xml";

const ENV_PREFIX: &str = "RATEKIT";

/// Main application settings.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub general: GeneralConfig,
    /// Engine configuration
    #[serde(default)]
    pub engine: EngineConfig,
    /// Treasury curve construction
    #[serde(default)]
    pub curve: CurveConfig,
    /// Hull-White simulation
    #[serde(default)]
    pub hull_white: HullWhiteConfig,
    #[serde(default)]
    pub bdt: BdtConfig,
}

impl Settings {
    /// Load settings from configuration files and environment variables.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `RATEKIT_ENV`)
    /// 3. Environment variables prefixed with `RATEKIT_` (`__` separates sections,
    ///    e.g. `RATEKIT_HULL_WHITE__SIGMA=0.015`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_dir("config")
    }

    /// Same layering as [`Settings::load`], with the files read from `dir`.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let env = std::env::var("RATEKIT_ENV").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join(&env)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a single explicit file, ignoring the environment.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let config = Config::builder()
            .add_source(File::from(path).required(true))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.thread_pool_size == 0 {
            return Err(ConfigError::invalid("engine.thread_pool_size", "must be at least 1"));
        }
        if self.curve.request_timeout_secs == 0 {
            return Err(ConfigError::invalid("curve.request_timeout_secs", "must be at least 1"));
        }
        if self.curve.face_amount <= 0.0 {
            return Err(ConfigError::invalid("curve.face_amount", "must be positive"));
        }
        if !matches!(
            self.curve.interpolation.as_str(),
            "linear" | "log-linear" | "log-cubic"
        ) {
            return Err(ConfigError::invalid(
                "curve.interpolation",
                format!(
                    "expected one of linear, log-linear, log-cubic; got '{}'",
                    self.curve.interpolation
                ),
            ));
        }
        if self.hull_white.a <= 0.0 {
            return Err(ConfigError::invalid("hull_white.a", "mean reversion must be positive"));
        }
        if self.hull_white.sigma <= 0.0 {
            return Err(ConfigError::invalid("hull_white.sigma", "volatility must be positive"));
        }
        if self.hull_white.time_steps == 0 || self.hull_white.num_paths == 0 {
            return Err(ConfigError::invalid(
                "hull_white",
                "time_steps and num_paths must be at least 1",
            ));
        }
        if self.hull_white.horizon_years <= 0.0 {
            return Err(ConfigError::invalid("hull_white.horizon_years", "must be positive"));
        }
        if self.bdt.max_tenor == 0 {
            return Err(ConfigError::invalid("bdt.max_tenor", "must be at least 1"));
        }
        Ok(())
    }
}

/// Process-wide settings.
#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for CSV outputs written without an explicit path
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// Engine configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Thread pool size for parallel computation
    #[serde(default = "default_thread_pool_size")]
    pub thread_pool_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thread_pool_size: default_thread_pool_size(),
        }
    }
}

fn default_thread_pool_size() -> usize {
    num_cpus::get()
}

/// Treasury curve construction.
#[derive(Debug, Deserialize, Clone)]
pub struct CurveConfig {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Business days between trade and settlement
    #[serde(default = "default_settlement_days")]
    pub settlement_days: u32,
    #[serde(default = "default_face_amount")]
    pub face_amount: f64,
    /// One of `linear`, `log-linear`, `log-cubic`
    #[serde(default = "default_interpolation")]
    pub interpolation: String,
    /// Number of monthly rows in the spot-rate table
    #[serde(default = "default_months")]
    pub months: u32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            request_timeout_secs: default_request_timeout(),
            settlement_days: default_settlement_days(),
            face_amount: default_face_amount(),
            interpolation: default_interpolation(),
            months: default_months(),
        }
    }
}

fn default_feed_url() -> String {
    DEFAULT_TREASURY_FEED_URL.into()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_settlement_days() -> u32 {
    1
}

fn default_face_amount() -> f64 {
    100.0
}

fn default_interpolation() -> String {
    "log-cubic".into()
}

fn default_months() -> u32 {
    360
}

/// Hull-White model and simulation parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct HullWhiteConfig {
    /// Mean reversion speed
    #[serde(default = "default_hw_a")]
    pub a: f64,
    #[serde(default = "default_hw_sigma")]
    pub sigma: f64,
    #[serde(default = "default_time_steps")]
    pub time_steps: usize,
    #[serde(default = "default_horizon_years")]
    pub horizon_years: f64,
    #[serde(default = "default_num_paths")]
    pub num_paths: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for HullWhiteConfig {
    fn default() -> Self {
        Self {
            a: default_hw_a(),
            sigma: default_hw_sigma(),
            time_steps: default_time_steps(),
            horizon_years: default_horizon_years(),
            num_paths: default_num_paths(),
            seed: default_seed(),
        }
    }
}

fn default_hw_a() -> f64 {
    0.01
}

fn default_hw_sigma() -> f64 {
    0.01
}

fn default_time_steps() -> usize {
    360
}

fn default_horizon_years() -> f64 {
    30.0
}

fn default_num_paths() -> usize {
    4096
}

fn default_seed() -> u64 {
    42
}

/// BDT calibration.
#[derive(Debug, Deserialize, Clone)]
pub struct BdtConfig {
    /// Longest tenor (years) the tree is calibrated to
    #[serde(default = "default_max_tenor")]
    pub max_tenor: u32,
}

impl Default for BdtConfig {
    fn default() -> Self {
        Self {
            max_tenor: default_max_tenor(),
        }
    }
}

fn default_max_tenor() -> u32 {
    5
}
