//! Runs the external contact program over many structures.
//!
//! Jobs go out in batches of `nproc`; a batch must finish before the next
//! one starts. Every job's exit status is checked and all failures are
//! reported together once the last batch is done.

use ahash::{AHashMap, AHashSet};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::CHAIN_COLUMN;
use crate::config::ContactsConfig;
use crate::error::{Error, Result};

/// Byte offset of the segment id in PDB `ATOM` records.
pub const SEGID_COLUMN: usize = 72;

/// Numbers the segment ids of a structure: distinct ids found in `ATOM`
/// records, sorted, counted from 1.
pub fn segment_numbers(pdb: &str) -> AHashMap<char, String> {
    let mut segids: Vec<char> = pdb
        .lines()
        .filter(|line| line.starts_with("ATOM"))
        .filter_map(|line| line.get(SEGID_COLUMN..).and_then(|rest| rest.chars().next()))
        .collect::<AHashSet<char>>()
        .into_iter()
        .collect();
    segids.sort_unstable();

    segids
        .into_iter()
        .enumerate()
        .map(|(i, segid)| (segid, (i + 1).to_string()))
        .collect()
}

/// Keeps contacts whose two chain columns both carry a selected number.
#[derive(Debug, Clone)]
pub struct SegmentFilter {
    chains: AHashSet<String>,
}

impl SegmentFilter {
    /// Maps the requested segment ids through the representative structure.
    pub fn from_representative(pdb: &str, segments: &[char]) -> Self {
        let numbers = segment_numbers(pdb);
        let chains = segments
            .iter()
            .filter_map(|segid| match numbers.get(segid) {
                Some(number) => Some(number.clone()),
                None => {
                    warn!("Segment {} not found in representative structure", segid);
                    None
                }
            })
            .collect();
        Self { chains }
    }

    pub fn accepts(&self, contact: &str) -> bool {
        let first = contact.get(CHAIN_COLUMN..CHAIN_COLUMN + 1);
        let last = contact.char_indices().last().map(|(pos, _)| &contact[pos..]);
        match (first, last) {
            (Some(first), Some(last)) => self.chains.contains(first) && self.chains.contains(last),
            _ => false,
        }
    }
}

/// Distinct, sorted contacts from the program output, optionally filtered.
pub fn collect_contacts(output: &str, filter: Option<&SegmentFilter>) -> Vec<String> {
    let mut contacts: Vec<String> = output
        .lines()
        .filter(|line| !line.is_empty())
        .filter(|line| filter.map_or(true, |f| f.accepts(line)))
        .map(str::to_string)
        .collect();
    contacts.sort();
    contacts.dedup();
    contacts
}

pub struct ContactGenerator {
    executable: PathBuf,
    distance_cutoff: String,
    nproc: usize,
    filter: Option<SegmentFilter>,
    extension: String,
}

impl ContactGenerator {
    /// Checks the executable and, with a selection, reads the first
    /// structure to number its segments.
    pub fn new(config: &ContactsConfig, structures: &[PathBuf]) -> Result<Self> {
        if !config.executable.exists() {
            return Err(Error::config(format!(
                "Path not found: {}",
                config.executable.display()
            )));
        }
        let executable = fs::canonicalize(&config.executable)?;

        let segments = config.selected_segments();
        let (filter, extension) = if segments.is_empty() {
            (None, ".contacts".to_string())
        } else {
            let representative = structures
                .first()
                .ok_or_else(|| Error::contacts("no structures to read segments from"))?;
            let pdb = fs::read_to_string(representative)?;
            let suffix: String = segments.iter().collect();
            (
                Some(SegmentFilter::from_representative(&pdb, &segments)),
                format!(".contacts-{}", suffix),
            )
        };

        Ok(Self {
            executable,
            distance_cutoff: config.distance_cutoff.clone(),
            nproc: config.effective_nproc().max(1),
            filter,
            extension,
        })
    }

    /// `<dir>/<stem><extension>` next to the structure file.
    pub fn output_path(&self, structure: &Path) -> PathBuf {
        let stem = structure
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        structure.with_file_name(format!("{}{}", stem, self.extension))
    }

    fn run_one(&self, structure: &Path) -> Result<PathBuf> {
        let output = Command::new(&self.executable)
            .arg(&self.distance_cutoff)
            .arg(structure)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::contacts(format!(
                "could not launch {} for {}: {}",
                self.executable.display(),
                structure.display(),
                e
            )))?;

        if !output.status.success() {
            return Err(Error::contacts(format!(
                "{} failed on {} ({}): {}",
                self.executable.display(),
                structure.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let contacts = collect_contacts(&stdout, self.filter.as_ref());

        let path = self.output_path(structure);
        let mut content = contacts.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(&path, content)?;

        debug!("Wrote {} contacts to {:?}", contacts.len(), path);
        Ok(path)
    }

    /// Generates a contact file per structure; returns them in input order.
    pub fn run(&self, structures: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.nproc)
            .build()?;

        info!(
            "Calculating contacts for {} structures, {} at a time",
            structures.len(),
            self.nproc
        );

        let progress = ProgressBar::new(structures.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} structures")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut written = Vec::with_capacity(structures.len());
        let mut failures = Vec::new();

        for batch in structures.chunks(self.nproc) {
            let results: Vec<Result<PathBuf>> =
                pool.install(|| batch.par_iter().map(|s| self.run_one(s)).collect());

            for result in results {
                match result {
                    Ok(path) => written.push(path),
                    Err(e) => {
                        warn!("{}", e);
                        failures.push(e.to_string());
                    }
                }
            }
            progress.inc(batch.len() as u64);
        }
        progress.finish_and_clear();

        if !failures.is_empty() {
            return Err(Error::contacts(format!(
                "{} of {} structures failed:\n{}",
                failures.len(),
                structures.len(),
                failures.join("\n")
            )));
        }

        info!("Finished");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(segid: char) -> String {
        format!("{:<72}{}", "ATOM      1  N   ALA A   1", segid)
    }

    #[test]
    fn test_segment_numbers_sorted_from_one() {
        let pdb = [atom('C'), atom('A'), atom('C'), "HETATM".to_string()].join("\n");
        let numbers = segment_numbers(&pdb);
        assert_eq!(numbers.len(), 2);
        assert_eq!(numbers.get(&'A').map(String::as_str), Some("1"));
        assert_eq!(numbers.get(&'C').map(String::as_str), Some("2"));
    }

    #[test]
    fn test_filter_checks_both_chain_columns() {
        let pdb = [atom('A'), atom('B'), atom('C')].join("\n");
        let filter = SegmentFilter::from_representative(&pdb, &['A', 'C']);

        assert!(filter.accepts("00012100034 3"));
        assert!(!filter.accepts("00012100034 2"));
        assert!(!filter.accepts("00012200034 3"));
        assert!(!filter.accepts("0001"));
    }

    #[test]
    fn test_collect_contacts_dedups_and_sorts() {
        let contacts = collect_contacts("b\na\nb\n\n", None);
        assert_eq!(contacts, vec!["a".to_string(), "b".to_string()]);
    }
}
