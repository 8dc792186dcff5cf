//! TOML run configuration.
//!
//! ```toml
//! [qa]
//! fixtures = "fixtures/qa"
//!
//! [stg]
//! fixtures = "fixtures/stg"
//!
//! [retry]
//! max_retries = 3
//! delay_secs = 3
//! ```
//!
//! Relative fixture paths resolve against the directory holding the file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SourceError;
use crate::retry::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Qa,
    Staging,
}

impl Environment {
    /// `qa`, `stg` or `staging`; anything else falls back to QA with a warning.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "qa" => Self::Qa,
            "stg" | "staging" => Self::Staging,
            other => {
                warn!(environment = other, "unknown environment, defaulting to qa");
                Self::Qa
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Qa => "qa",
            Self::Staging => "stg",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Fixture directory backing the data source.
    pub fixtures: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub qa: EnvironmentConfig,
    #[serde(default)]
    pub stg: Option<EnvironmentConfig>,
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path).map_err(|error| SourceError::io(path, error))?;
        let mut config: Self = toml::from_str(&text).map_err(|source| SourceError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |env: &mut EnvironmentConfig| {
            if env.fixtures.is_relative() {
                env.fixtures = base.join(&env.fixtures);
            }
        };
        resolve(&mut self.qa);
        if let Some(stg) = self.stg.as_mut() {
            resolve(stg);
        }
    }

    pub fn environment(&self, environment: Environment) -> Result<&EnvironmentConfig, SourceError> {
        match environment {
            Environment::Qa => Ok(&self.qa),
            Environment::Staging => self.stg.as_ref().ok_or_else(|| SourceError::NotFound {
                what: "[stg] table in run configuration".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_names() {
        assert_eq!(Environment::from_name("qa"), Environment::Qa);
        assert_eq!(Environment::from_name("STG"), Environment::Staging);
        assert_eq!(Environment::from_name("staging"), Environment::Staging);
        assert_eq!(Environment::from_name("prod"), Environment::Qa);
    }

    #[test]
    fn retry_table_is_optional() {
        let config: RunConfig = toml::from_str("[qa]\nfixtures = \"qa\"\n").unwrap();
        assert_eq!(config.retry, RetryPolicy::default());
        assert!(config.environment(Environment::Staging).is_err());
    }

    #[test]
    fn partial_retry_table_keeps_defaults() {
        let config: RunConfig =
            toml::from_str("[qa]\nfixtures = \"qa\"\n[retry]\nmax_retries = 1\n").unwrap();
        assert_eq!(config.retry.max_retries, 1);
        assert_eq!(config.retry.delay_secs, 3);
    }
}
