//! Server configuration: defaults, then an optional TOML file, then
//! `AUTOSAVE_*` environment variables. CLI flags are applied last by the
//! caller.

use std::path::Path;

use serde::Deserialize;

use crate::error::CliError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Maximum form body size: 64 KiB.
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

pub(crate) const HOST_VAR: &str = "AUTOSAVE_HOST";
pub(crate) const PORT_VAR: &str = "AUTOSAVE_PORT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        ServeConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServeConfig {
    /// Load from `path` (if any) and the process environment.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => ServeConfig::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override fields from environment variables; blank values are ignored.
    pub(crate) fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), CliError> {
        if let Some(host) = lookup(HOST_VAR).filter(|v| !v.trim().is_empty()) {
            self.host = host.trim().to_string();
        }
        if let Some(port) = lookup(PORT_VAR).filter(|v| !v.trim().is_empty()) {
            self.port = port.trim().parse().map_err(|_| CliError::InvalidEnv {
                var: PORT_VAR,
                value: port.clone(),
            })?;
        }
        Ok(())
    }

    pub(crate) fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
