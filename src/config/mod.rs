pub mod subsystems;

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use crate::error::Result;
use log::{warn, trace};

pub use subsystems::{ClusterConfig, ContactsConfig, LoggingConfig, MatrixConfig};

pub trait FromIni {
    fn from_ini_section(&mut self, section_name: &str, key: &str, value: &str) -> Option<Result<()>>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FccConfig {
    pub matrix: MatrixConfig,
    pub cluster: ClusterConfig,
    pub contacts: ContactsConfig,
    pub logging: LoggingConfig,
    /// Lines the parser skipped. Kept until logging is up, then reported
    /// by [`FccConfig::log_warnings`].
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl FccConfig {
    pub fn validate(&self) -> Result<()> {
        self.matrix.validate()?;
        self.cluster.validate()?;
        self.contacts.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Reports the skipped config lines. Call after the logger is set up.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }

    /// Loads the defaults, then overrides them from an INI file.
    pub fn from_ini<P: AsRef<Path>>(path: P) -> Result<Self> {
        trace!("Loading configuration from: {:?}", path.as_ref());

        let content = fs::read_to_string(&path)?;
        let config = Self::from_ini_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`FccConfig::from_ini`] but reads an optional path, keeping the
    /// defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_ini(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_ini_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current_section = String::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].trim().to_string();
                trace!("  Line {}: Found section: [{}]", line_num + 1, current_section);
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                let handled = match current_section.as_str() {
                    "matrix" => config.matrix.from_ini_section(&current_section, key, value),
                    "cluster" => config.cluster.from_ini_section(&current_section, key, value),
                    "contacts" => config.contacts.from_ini_section(&current_section, key, value),
                    "logging" => config.logging.from_ini_section(&current_section, key, value),
                    _ => None,
                };

                match handled {
                    // Bad values are fatal: a silently ignored cutoff changes every result
                    Some(result) => result?,
                    None => config.warnings.push(format!(
                        "Unrecognized config key: {}={} in section [{}]",
                        key, value, current_section
                    )),
                }
            } else {
                config.warnings.push(format!(
                    "Ignoring config line {} without '=': {}",
                    line_num + 1,
                    line
                ));
            }
        }

        Ok(config)
    }
}
