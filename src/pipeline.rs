//! The two end-to-end runs the binaries expose.

use std::io::Write;
use std::path::{Path, PathBuf};
use log::info;

use crate::cluster::{self, Clustering, ClusteringSummary, NeighborGraph};
use crate::config::{ClusterConfig, MatrixConfig};
use crate::contacts::{ChainMode, ContactSets};
use crate::error::{Error, Result};
use crate::matrix::{write_matrix, FccMatrix};

/// Inputs below this count cannot form a single pair.
pub const MIN_STRUCTURES: usize = 2;

/// Checks the inputs and loads every contact file. Nothing is written, so
/// a failure here leaves any previous output in place.
pub fn load_matrix(paths: &[PathBuf], config: &MatrixConfig) -> Result<FccMatrix> {
    let paths: Vec<&PathBuf> = paths.iter().filter(|p| !p.as_os_str().is_empty()).collect();
    if paths.len() < MIN_STRUCTURES {
        return Err(Error::config(format!(
            "Provide (at least) two structures to calculate a matrix. You provided {}.",
            paths.len()
        )));
    }
    if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
        return Err(Error::config(format!("File not found: {}", missing.display())));
    }

    let mode = ChainMode::from_flag(config.ignore_chain);
    if mode == ChainMode::Ignore {
        info!("Ignoring chain characters; collapsed contacts keep their duplicates");
    }

    let contacts = ContactSets::load(&paths, mode)?;
    Ok(FccMatrix::new(contacts))
}

/// Streams a loaded matrix to `sink`. Returns the number of rows written.
pub fn write_fcc_matrix<W: Write>(matrix: &FccMatrix, config: &MatrixConfig, sink: W) -> Result<usize> {
    info!("Calculating Matrix");
    let rows = write_matrix(sink, matrix.pairs(), config.buffer_size)?;
    info!("Wrote {} matrix rows", rows);
    Ok(rows)
}

/// [`load_matrix`] followed by [`write_fcc_matrix`].
pub fn calculate_matrix<W: Write>(paths: &[PathBuf], config: &MatrixConfig, sink: W) -> Result<usize> {
    let matrix = load_matrix(paths, config)?;
    write_fcc_matrix(&matrix, config, sink)
}

/// Result of [`cluster_matrix`].
pub struct ClusterRun {
    pub graph: NeighborGraph,
    pub clustering: Clustering,
    pub summary: ClusteringSummary,
}

/// Reads a persisted matrix and clusters it, with the optional false
/// singleton pass.
pub fn cluster_matrix(matrix_path: &Path, config: &ClusterConfig) -> Result<ClusterRun> {
    let graph = NeighborGraph::from_path(matrix_path, config.cutoff)?;
    Ok(cluster_graph(graph, config))
}

pub fn cluster_graph(graph: NeighborGraph, config: &ClusterConfig) -> ClusterRun {
    let mut clustering = cluster::cluster_elements(&graph, config.min_cluster_size);

    let reinserted = if config.include_false_singletons {
        cluster::include_false_singletons(&graph, &mut clustering)
    } else {
        0
    };

    let summary = ClusteringSummary::new(&clustering, config.cutoff, config.min_cluster_size, reinserted);
    ClusterRun { graph, clustering, summary }
}
