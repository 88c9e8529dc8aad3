// src/config/subsystems/contacts.rs

use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use crate::error::{Error, Result};
use crate::config::FromIni;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactsConfig {
    /// External program printing the contacts of one structure
    pub executable: PathBuf,
    /// Distance cutoff in Angstrom, handed verbatim to the executable
    pub distance_cutoff: String,
    /// Simultaneous processes per batch, 0 = one per CPU
    pub nproc: usize,
    /// Comma separated segment ids to keep, e.g. "A,C"
    pub selection: Option<String>,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("contact_fcc"),
            distance_cutoff: "5.0".to_string(),
            nproc: 1,
            selection: None,
        }
    }
}

impl FromIni for ContactsConfig {
    fn from_ini_section(&mut self, _section_name: &str, key: &str, value: &str) -> Option<Result<()>> {
        let value = value.trim_matches('"');
        match key {
            "executable" => {
                self.executable = PathBuf::from(value);
                Some(Ok(()))
            },
            "distance_cutoff" => match value.parse::<f64>() {
                Ok(_) => {
                    self.distance_cutoff = value.to_string();
                    Some(Ok(()))
                },
                Err(_) => Some(Err(Error::Config(
                    format!("Invalid distance_cutoff: {}", value)
                ))),
            },
            "nproc" => match value.parse::<usize>() {
                Ok(nproc) => {
                    self.nproc = nproc;
                    Some(Ok(()))
                },
                Err(_) => Some(Err(Error::Config(
                    format!("Invalid nproc: {}", value)
                ))),
            },
            "selection" => {
                self.selection = if value.is_empty() { None } else { Some(value.to_string()) };
                Some(Ok(()))
            },
            _ => None,
        }
    }
}

impl ContactsConfig {
    /// Worker count with the "0 = all CPUs" rule applied.
    pub fn effective_nproc(&self) -> usize {
        if self.nproc == 0 {
            num_cpus::get()
        } else {
            self.nproc
        }
    }

    /// Selected segment ids, in the order given.
    pub fn selected_segments(&self) -> Vec<char> {
        self.selection
            .as_deref()
            .map(|sele| {
                sele.split(',')
                    .filter_map(|s| s.trim().chars().next())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        match self.distance_cutoff.parse::<f64>() {
            Ok(cutoff) if cutoff > 0.0 => {},
            _ => return Err(Error::Config(
                format!("distance_cutoff must be a positive number, got {}", self.distance_cutoff)
            )),
        }
        if let Some(sele) = &self.selection {
            if sele.split(',').any(|s| s.trim().chars().count() != 1) {
                return Err(Error::Config(
                    format!("selection must list single-character segment ids, got {}", sele)
                ));
            }
        }
        Ok(())
    }
}
