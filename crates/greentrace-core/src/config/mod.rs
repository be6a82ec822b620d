//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file, an optional environment overlay, and
//! `GREENTRACE__`-prefixed environment variables. Every field has a default,
//! so an empty source set yields [`AppConfig::default`].

pub mod compliance;
pub mod export;
pub mod logging;
pub mod registry;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use self::compliance::ComplianceConfig;
pub use self::export::ExportConfig;
pub use self::logging::LoggingConfig;
pub use self::registry::{RegistryConfig, TransitionPolicy};

use crate::error::AppError;

/// Environment variable naming the overlay file under `config/`.
pub const ENV_VAR: &str = "GREENTRACE_ENV";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Document registry behaviour.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Compliance coverage denominators.
    #[serde(default)]
    pub compliance: ComplianceConfig,
    /// Audit export settings.
    #[serde(default)]
    pub export: ExportConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges the file at `path` (if any), the `config/{GREENTRACE_ENV}`
    /// overlay (if present), and environment variables prefixed with
    /// `GREENTRACE__` using `__` as the nesting separator.
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        if let Ok(env) = std::env::var(ENV_VAR) {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("GREENTRACE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        app_config.validate()?;
        debug!(policy = %app_config.registry.transition_policy, "Configuration loaded");
        Ok(app_config)
    }

    /// Reject configurations that would make aggregate metrics meaningless.
    pub fn validate(&self) -> Result<(), AppError> {
        let c = &self.compliance;
        if c.csrd_total == 0 || c.gri_total == 0 || c.issb_total == 0 {
            return Err(AppError::configuration(
                "compliance framework totals must be greater than zero",
            ));
        }
        match self.logging.format.as_str() {
            "json" | "pretty" => Ok(()),
            other => Err(AppError::configuration(format!(
                "unknown logging format '{other}' (expected 'json' or 'pretty')"
            ))),
        }
    }
}
