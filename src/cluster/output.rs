use serde::{Serialize, Deserialize};
use std::io::{BufRead, Write};
use log::info;

use super::disjoint::{Cluster, Clustering};
use crate::error::{Error, Result};
use crate::types::{ClusterId, StructureId};

/// Marker appended to flagged (false singleton) members.
pub const FLAGGED_MARKER: char = '*';

/// Writes `Cluster <id> -> <center> <member> ... <flagged>* ...`, one line
/// per cluster in creation order. Every token is followed by a space.
pub fn write_clusters<W: Write>(mut out: W, clusters: &[Cluster]) -> Result<()> {
    info!("Writing {} Clusters", clusters.len());
    for cluster in clusters {
        let mut line = format!("Cluster {} -> {} ", cluster.id, cluster.center);
        for member in &cluster.members {
            line.push_str(&format!("{} ", member));
        }
        for flagged in &cluster.flagged {
            line.push_str(&format!("{}{} ", flagged, FLAGGED_MARKER));
        }
        line.push('\n');
        out.write_all(line.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// One parsed line of a cluster stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRecord {
    pub id: ClusterId,
    pub center: StructureId,
    pub members: Vec<StructureId>,
    pub flagged: Vec<StructureId>,
}

impl ClusterRecord {
    /// Center first, then members, then flagged members.
    pub fn structures(&self) -> impl Iterator<Item = StructureId> + '_ {
        std::iter::once(self.center)
            .chain(self.members.iter().copied())
            .chain(self.flagged.iter().copied())
    }
}

pub fn parse_cluster_line(line: &str, line_num: usize) -> Result<ClusterRecord> {
    let mut tokens = line.split_whitespace();

    if tokens.next() != Some("Cluster") {
        return Err(Error::cluster_parse(line_num, "line does not start with 'Cluster'"));
    }
    let id = tokens
        .next()
        .and_then(|t| t.parse::<ClusterId>().ok())
        .ok_or_else(|| Error::cluster_parse(line_num, "missing cluster id"))?;
    if tokens.next() != Some("->") {
        return Err(Error::cluster_parse(line_num, "missing '->'"));
    }

    let parse_id = |token: &str| {
        token
            .parse::<StructureId>()
            .map_err(|_| Error::cluster_parse(line_num, format!("bad structure id {:?}", token)))
    };

    let center = match tokens.next() {
        Some(token) => parse_id(token)?,
        None => return Err(Error::cluster_parse(line_num, "missing cluster center")),
    };

    let mut members = Vec::new();
    let mut flagged = Vec::new();
    for token in tokens {
        match token.strip_suffix(FLAGGED_MARKER) {
            Some(id) => flagged.push(parse_id(id)?),
            None => members.push(parse_id(token)?),
        }
    }

    Ok(ClusterRecord { id, center, members, flagged })
}

pub fn read_clusters<R: BufRead>(reader: R) -> Result<Vec<ClusterRecord>> {
    let mut records = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_cluster_line(&line, line_num + 1)?);
    }
    Ok(records)
}

/// Run statistics, serialisable for downstream tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringSummary {
    pub cutoff: f64,
    pub min_cluster_size: usize,
    pub total_elements: usize,
    pub true_singletons: usize,
    pub false_singletons_reinserted: usize,
    pub clustered: usize,
    pub coverage_percent: f64,
    pub cluster_sizes: Vec<usize>,
}

impl ClusteringSummary {
    pub fn new(clustering: &Clustering, cutoff: f64, min_cluster_size: usize, reinserted: usize) -> Self {
        Self {
            cutoff,
            min_cluster_size,
            total_elements: clustering.total_elements(),
            true_singletons: clustering.true_singletons.len(),
            false_singletons_reinserted: reinserted,
            clustered: clustering.clustered_count(),
            coverage_percent: clustering.coverage_percent(),
            cluster_sizes: clustering.clusters.iter().map(Cluster::len).collect(),
        }
    }

    pub fn log(&self) {
        info!(
            "Coverage {:3.2}% ({}/{})",
            self.coverage_percent, self.clustered, self.total_elements
        );
    }

    pub fn write_json<W: Write>(&self, out: W) -> Result<()> {
        serde_json::to_writer_pretty(out, self)?;
        Ok(())
    }
}
