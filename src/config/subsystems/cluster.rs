// src/config/subsystems/cluster.rs

use serde::{Serialize, Deserialize};
use crate::error::{Error, Result};
use crate::config::FromIni;
use super::parse_bool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Scores strictly above this value make two structures neighbors
    pub cutoff: f64,
    /// Minimum number of elements in a cluster, center included
    pub min_cluster_size: usize,
    /// Post-clustering step that reinserts false singletons into clusters
    pub include_false_singletons: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            cutoff: 0.75,
            min_cluster_size: 4,
            include_false_singletons: false,
        }
    }
}

impl FromIni for ClusterConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        let value = value.trim_matches('"');
        match key {
            "cutoff" => match value.parse::<f64>() {
                Ok(cutoff) => {
                    self.cutoff = cutoff;
                    Some(Ok(()))
                },
                Err(_) => Some(Err(Error::Config(
                    format!("Invalid cutoff: {}", value)
                ))),
            },
            "min_cluster_size" => match value.parse::<usize>() {
                Ok(size) => {
                    self.min_cluster_size = size;
                    Some(Ok(()))
                },
                Err(_) => Some(Err(Error::Config(
                    format!("Invalid min_cluster_size: {}", value)
                ))),
            },
            "include_false_singletons" => match parse_bool(value) {
                Some(flag) => {
                    self.include_false_singletons = flag;
                    Some(Ok(()))
                },
                None => Some(Err(Error::Config(
                    format!("Invalid include_false_singletons (expected true/false): {}", value)
                ))),
            },
            _ => None,
        }
    }
}

impl ClusterConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.cutoff.is_finite() {
            return Err(Error::Config(
                format!("cutoff must be a finite number, got {}", self.cutoff)
            ));
        }
        if self.min_cluster_size == 0 {
            return Err(Error::Config(
                "min_cluster_size must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}
