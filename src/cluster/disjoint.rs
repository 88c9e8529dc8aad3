//! Asymmetric Taylor-Butina disjoint clustering.
//!
//! The element with the most still-unclustered neighbors becomes a center
//! and takes all of them as members; this repeats until no candidate has
//! enough unclustered neighbors left to reach the minimum cluster size.

use log::{debug, info};
use serde::{Serialize, Deserialize};

use super::graph::NeighborGraph;
use crate::types::{ClusterId, StructureId, UNCLUSTERED};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: ClusterId,
    pub center: StructureId,
    /// Members annexed from the center's neighbor list, in that order
    pub members: Vec<StructureId>,
    /// False singletons reinserted after the main pass
    pub flagged: Vec<StructureId>,
}

impl Cluster {
    fn new(id: ClusterId, center: StructureId) -> Self {
        Self { id, center, members: Vec::new(), flagged: Vec::new() }
    }

    /// Center, members and flagged members together.
    pub fn len(&self) -> usize {
        self.members.len() + self.flagged.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Outcome of a clustering run over one [`NeighborGraph`].
#[derive(Debug, Clone)]
pub struct Clustering {
    /// Clusters in creation order; cluster `id` sits at `id - 1`
    pub clusters: Vec<Cluster>,
    /// Cluster id per arena index, `UNCLUSTERED` for none
    pub assignments: Vec<ClusterId>,
    /// Arena indices of elements without any neighbor
    pub true_singletons: Vec<usize>,
}

impl Clustering {
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        id.checked_sub(1).and_then(|pos| self.clusters.get(pos))
    }

    pub fn is_true_singleton(&self, idx: usize) -> bool {
        self.true_singletons.binary_search(&idx).is_ok()
    }

    /// Arena indices still unassigned that are not true singletons.
    pub fn unclustered(&self) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|&(idx, &c)| c == UNCLUSTERED && !self.is_true_singleton(idx))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Elements inside some cluster, flagged members included.
    pub fn clustered_count(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }

    pub fn total_elements(&self) -> usize {
        self.assignments.len()
    }

    pub fn coverage_percent(&self) -> f64 {
        match self.total_elements() {
            0 => 0.0,
            total => self.clustered_count() as f64 * 100.0 / total as f64,
        }
    }
}

/// Count of `idx`'s neighbors that are still unclustered.
fn open_neighbors(graph: &NeighborGraph, assignments: &[ClusterId], idx: usize) -> usize {
    graph
        .neighbors(idx)
        .iter()
        .filter(|&&n| assignments[n] == UNCLUSTERED)
        .count()
}

/// Greedy disjoint clustering with a minimum size (center included).
///
/// Ties on the neighbor count go to the numerically largest structure id.
pub fn cluster_elements(graph: &NeighborGraph, min_cluster_size: usize) -> Clustering {
    let true_singletons: Vec<usize> = (0..graph.len())
        .filter(|&idx| graph.is_true_singleton(idx))
        .collect();
    info!("Detected {} True Singletons", true_singletons.len());

    let mut pool: Vec<usize> = (0..graph.len())
        .filter(|&idx| !graph.is_true_singleton(idx))
        .collect();

    let mut assignments = vec![UNCLUSTERED; graph.len()];
    let mut clusters = Vec::new();
    let threshold = min_cluster_size.saturating_sub(1);
    let mut next_id: ClusterId = 1;

    loop {
        pool.retain(|&idx| assignments[idx] == UNCLUSTERED);

        let best = pool
            .iter()
            .map(|&idx| (open_neighbors(graph, &assignments, idx), graph.id(idx), idx))
            .max_by_key(|&(count, id, _)| (count, id));

        let Some((count, center_id, center)) = best else {
            debug!("No unclustered elements left");
            break;
        };

        if count < threshold {
            debug!(
                "Best candidate {} has {} unclustered neighbors, below threshold {}",
                center_id, count, threshold
            );
            break;
        }

        let mut cluster = Cluster::new(next_id, center_id);
        assignments[center] = next_id;
        for &n in graph.neighbors(center) {
            if assignments[n] == UNCLUSTERED {
                assignments[n] = next_id;
                cluster.members.push(graph.id(n));
            }
        }

        debug!("Cluster {} centered on {} with {} members", next_id, center_id, cluster.members.len());
        clusters.push(cluster);
        next_id += 1;
    }

    Clustering { clusters, assignments, true_singletons }
}
