//! Maps structure numbers in a cluster stream back to structure names.

use ahash::AHashMap;
use std::fs;
use std::path::Path;

use super::output::{ClusterRecord, FLAGGED_MARKER};
use crate::error::{Error, Result};
use crate::types::StructureId;

/// Name without its last extension; names without a dot are kept whole.
fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// Structure names keyed by 1-based line number. Blank lines are skipped
/// but still advance the numbering.
pub fn parse_name_list(content: &str) -> AHashMap<StructureId, String> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(nline, line)| (nline + 1, strip_extension(line.trim()).to_string()))
        .collect()
}

pub fn read_name_list<P: AsRef<Path>>(path: P) -> Result<AHashMap<StructureId, String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
    })?;
    Ok(parse_name_list(&content))
}

/// `Cluster <n> -> <name> ...` per record, numbered by position.
pub fn name_clusters(
    records: &[ClusterRecord],
    names: &AHashMap<StructureId, String>,
) -> Result<Vec<String>> {
    let lookup = |id: StructureId| {
        names
            .get(&id)
            .map(String::as_str)
            .ok_or(Error::UnknownStructure(id))
    };

    records
        .iter()
        .enumerate()
        .map(|(pos, record)| {
            let mut named = Vec::with_capacity(record.members.len() + record.flagged.len() + 1);
            named.push(lookup(record.center)?.to_string());
            for &member in &record.members {
                named.push(lookup(member)?.to_string());
            }
            for &flagged in &record.flagged {
                named.push(format!("{}{}", lookup(flagged)?, FLAGGED_MARKER));
            }
            Ok(format!("Cluster {} -> {}", pos + 1, named.join(" ")))
        })
        .collect()
}
