// src/config/subsystems/matrix.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;
use super::parse_bool;

pub const DEFAULT_BUFFER_SIZE: usize = 50_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Number of matrix rows held in memory before they are written out
    pub buffer_size: usize,
    /// Drop the chain character from contacts (homomeric complexes)
    pub ignore_chain: bool,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            ignore_chain: false,
        }
    }
}

impl FromIni for MatrixConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        match key {
            "buffer_size" => match value.trim_matches('"').parse::<usize>() {
                Ok(size) => {
                    self.buffer_size = size;
                    Some(Ok(()))
                },
                Err(_) => Some(Err(Error::Config(
                    format!("Invalid buffer_size: {}", value)
                ))),
            },
            "ignore_chain" => match parse_bool(value) {
                Some(flag) => {
                    self.ignore_chain = flag;
                    Some(Ok(()))
                },
                None => Some(Err(Error::Config(
                    format!("Invalid ignore_chain (expected true/false): {}", value)
                ))),
            },
            _ => None,
        }
    }
}

impl MatrixConfig {
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(Error::Config(
                "buffer_size must be greater than 0".to_string()
            ));
        }
        Ok(())
    }
}
