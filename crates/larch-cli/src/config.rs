//! Configuration for the `larch` CLI.
//!
//! Settings come from, in increasing precedence:
//! 1. Default values
//! 2. A YAML configuration file
//! 3. Environment variables with the `LARCH_` prefix
//!
//! ```yaml
//! matching:
//!   policy: global_phase
//!   tolerance: 1.0e-8
//! verify: true
//! verify_tolerance: 1.0e-6
//! log_level: info
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use larch_compile::{LoweringPipeline, MatchPolicy};

/// Complete CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LarchConfig {
    /// How matrices are compared with the gate catalog
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Check every lowered circuit against its input matrix
    #[serde(default = "default_true")]
    pub verify: bool,

    /// Tolerance for the verification check
    #[serde(default = "default_verify_tolerance")]
    pub verify_tolerance: f64,

    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Catalog matching settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Matching policy: "exact" or "global_phase"
    #[serde(default = "default_policy")]
    pub policy: String,

    /// Per-element tolerance for the "global_phase" policy
    #[serde(default = "default_match_tolerance")]
    pub tolerance: f64,
}

fn default_true() -> bool {
    true
}

fn default_verify_tolerance() -> f64 {
    1e-6
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_policy() -> String {
    "exact".to_string()
}

fn default_match_tolerance() -> f64 {
    1e-8
}

impl Default for MatchingConfig {
    fn default() -> Self {
        MatchingConfig {
            policy: default_policy(),
            tolerance: default_match_tolerance(),
        }
    }
}

impl Default for LarchConfig {
    fn default() -> Self {
        LarchConfig {
            matching: MatchingConfig::default(),
            verify: default_true(),
            verify_tolerance: default_verify_tolerance(),
            log_level: default_log_level(),
        }
    }
}

impl LarchConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;

        let config: LarchConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the given file (or defaults), then apply
    /// environment overrides.
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => LarchConfig::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply `LARCH_*` environment variables.
    fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Only variables present in `lookup` change a field. Numeric and boolean
    /// values that fail to parse are ignored.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("LARCH_MATCH_POLICY") {
            self.matching.policy = v;
        }
        if let Some(v) = lookup("LARCH_TOLERANCE") {
            if let Ok(val) = v.parse() {
                self.matching.tolerance = val;
            }
        }
        if let Some(v) = lookup("LARCH_VERIFY") {
            if let Ok(val) = v.parse() {
                self.verify = val;
            }
        }
        if let Some(v) = lookup("LARCH_LOG_LEVEL") {
            self.log_level = v;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.matching.policy.as_str() {
            "exact" | "global_phase" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Unknown matching policy: {other} (expected exact or global_phase)"
                )));
            }
        }

        if !(self.matching.tolerance.is_finite() && self.matching.tolerance >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "matching.tolerance must be a non-negative number, got {}",
                self.matching.tolerance
            )));
        }

        if !(self.verify_tolerance.is_finite() && self.verify_tolerance >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "verify_tolerance must be a non-negative number, got {}",
                self.verify_tolerance
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }

    /// The configured matching policy.
    pub fn match_policy(&self) -> MatchPolicy {
        match self.matching.policy.as_str() {
            "global_phase" => MatchPolicy::UpToGlobalPhase {
                atol: self.matching.tolerance,
            },
            _ => MatchPolicy::Exact,
        }
    }

    /// Build a lowering pipeline from this configuration.
    pub fn pipeline(&self) -> Result<LoweringPipeline, ConfigError> {
        let mut builder = LoweringPipeline::builder().with_policy(self.match_policy());
        if self.verify {
            builder = builder.with_verification(self.verify_tolerance);
        }
        builder
            .build()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
