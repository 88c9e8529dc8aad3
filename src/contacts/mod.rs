//! Contact lists: one residue-pair identifier per line, fixed-column text.
//!
//! A record looks like `00012100034 2`: residue number, chain number at
//! [`CHAIN_COLUMN`], partner residue and partner chain. With chains kept
//! the whole record is the key; with chains ignored the first chain column
//! is dropped, so two records that differ only in that label collapse to
//! the same key but are still both kept.

pub mod generator;

use ahash::AHashSet;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub type ContactKey = i64;

/// Byte offset of the chain character dropped when chains are ignored.
pub const CHAIN_COLUMN: usize = 5;

/// How contact records are turned into keys, fixed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainMode {
    /// Exact record, collected into a true set
    Aware,
    /// Chain column dropped, duplicates preserved
    Ignore,
}

impl ChainMode {
    pub fn from_flag(ignore_chain: bool) -> Self {
        if ignore_chain {
            ChainMode::Ignore
        } else {
            ChainMode::Aware
        }
    }
}

/// Something two structures can be compared by.
pub trait CommonContacts {
    fn contact_count(&self) -> usize;

    /// Number of contacts shared with `other`, with the counting rule of
    /// the collection type.
    fn common_with(&self, other: &Self) -> usize;
}

impl CommonContacts for AHashSet<ContactKey> {
    fn contact_count(&self) -> usize {
        self.len()
    }

    fn common_with(&self, other: &Self) -> usize {
        self.intersection(other).count()
    }
}

/// Duplicate-preserving contact list, with its distinct keys for lookups.
#[derive(Debug, Clone, Default)]
pub struct ContactSequence {
    keys: Vec<ContactKey>,
    distinct: AHashSet<ContactKey>,
}

impl ContactSequence {
    pub fn new(keys: Vec<ContactKey>) -> Self {
        let distinct = keys.iter().copied().collect();
        Self { keys, distinct }
    }

    pub fn keys(&self) -> &[ContactKey] {
        &self.keys
    }
}

impl CommonContacts for ContactSequence {
    fn contact_count(&self) -> usize {
        self.keys.len()
    }

    /// Every entry of the shorter list (duplicates included) that occurs
    /// anywhere in the longer one. On equal lengths `self` is scanned.
    fn common_with(&self, other: &Self) -> usize {
        let (scanned, probed) = if other.keys.len() < self.keys.len() {
            (other, self)
        } else {
            (self, other)
        };
        scanned
            .keys
            .iter()
            .filter(|key| probed.distinct.contains(key))
            .count()
    }
}

/// All contact lists of a run, in input order (structure `i` is at `i - 1`).
#[derive(Debug, Clone)]
pub enum ContactSets {
    Aware(Vec<AHashSet<ContactKey>>),
    Ignore(Vec<ContactSequence>),
}

impl ContactSets {
    pub fn len(&self) -> usize {
        match self {
            ContactSets::Aware(sets) => sets.len(),
            ContactSets::Ignore(seqs) => seqs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mode(&self) -> ChainMode {
        match self {
            ContactSets::Aware(_) => ChainMode::Aware,
            ContactSets::Ignore(_) => ChainMode::Ignore,
        }
    }

    /// Loads every file in order. Blank path entries are skipped; any file
    /// that cannot be read aborts the whole load.
    pub fn load<P: AsRef<Path>>(paths: &[P], mode: ChainMode) -> Result<Self> {
        let paths: Vec<&Path> = paths
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| !p.as_os_str().is_empty())
            .collect();

        info!("Parsing {} contact files", paths.len());

        let sets = match mode {
            ChainMode::Aware => ContactSets::Aware(
                paths
                    .iter()
                    .map(|path| Ok(read_keys(path, mode)?.into_iter().collect()))
                    .collect::<Result<Vec<_>>>()?,
            ),
            ChainMode::Ignore => ContactSets::Ignore(
                paths
                    .iter()
                    .map(|path| Ok(ContactSequence::new(read_keys(path, mode)?)))
                    .collect::<Result<Vec<_>>>()?,
            ),
        };
        Ok(sets)
    }
}

/// Parses one contact record into its key.
pub fn parse_contact(line: &str, mode: ChainMode) -> std::result::Result<ContactKey, String> {
    let record = line.trim_end_matches(['\r', '\n']);
    let digits = match mode {
        ChainMode::Aware => record.trim().to_string(),
        ChainMode::Ignore => {
            let head = record.get(..CHAIN_COLUMN);
            let tail = record.get(CHAIN_COLUMN + 1..);
            match (head, tail) {
                (Some(head), Some(tail)) => format!("{}{}", head, tail).trim().to_string(),
                _ => return Err(format!("record too short to drop chain column: {:?}", record)),
            }
        }
    };
    digits
        .parse::<ContactKey>()
        .map_err(|e| format!("{:?} is not a contact identifier ({})", digits, e))
}

/// Reads the keys of one contact file in file order. Blank lines are skipped.
pub fn read_keys(path: &Path, mode: ChainMode) -> Result<Vec<ContactKey>> {
    let file = File::open(path).map_err(|e| {
        Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
    })?;
    let reader = BufReader::new(file);

    let mut keys = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let key = parse_contact(&line, mode).map_err(|message| Error::ContactParse {
            path: path.to_path_buf(),
            line: line_num + 1,
            message,
        })?;
        keys.push(key);
    }

    debug!("Read {} contacts from {:?}", keys.len(), path);
    Ok(keys)
}

/// Reads a list of paths, one per line; lines are trimmed and blanks dropped.
pub fn read_path_list(path: &Path) -> Result<Vec<PathBuf>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}
