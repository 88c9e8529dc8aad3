use ahash::AHashMap;
use log::{debug, info};

use super::disjoint::Clustering;
use super::graph::NeighborGraph;
use crate::types::{ClusterId, UNCLUSTERED};

/// Unclustered elements that are not true singletons.
///
/// A true singleton has no edge in either direction, so it is never a
/// neighbor of anything and no further filtering on neighbors is needed.
pub fn find_false_singletons(clustering: &Clustering) -> Vec<usize> {
    clustering.unclustered()
}

/// Most frequent cluster id among `idx`'s neighbors, unclustered ones
/// counted as id 0. Equal counts go to the largest id.
fn majority_cluster(graph: &NeighborGraph, assignments: &[ClusterId], idx: usize) -> Option<ClusterId> {
    let mut tally: AHashMap<ClusterId, usize> = AHashMap::new();
    for &n in graph.neighbors(idx) {
        *tally.entry(assignments[n]).or_insert(0) += 1;
    }
    tally
        .into_iter()
        .max_by_key(|&(id, count)| (count, id))
        .map(|(id, _)| id)
}

/// Appends each false singleton to the cluster most represented among its
/// neighbors, as a flagged member. Returns how many were placed.
///
/// Singletons are handled in arena order and each placement is visible to
/// the ones that follow.
pub fn include_false_singletons(graph: &NeighborGraph, clustering: &mut Clustering) -> usize {
    let candidates = find_false_singletons(clustering);
    info!("Reinserting {} False Singletons", candidates.len());

    let mut placed = 0;
    for idx in candidates {
        let winner = match majority_cluster(graph, &clustering.assignments, idx) {
            Some(id) if id != UNCLUSTERED => id,
            _ => {
                debug!("Structure {} stays unclustered", graph.id(idx));
                continue;
            }
        };

        if let Some(cluster) = clustering.clusters.get_mut(winner - 1) {
            cluster.flagged.push(graph.id(idx));
            clustering.assignments[idx] = winner;
            placed += 1;
            debug!("Structure {} joins cluster {} as false singleton", graph.id(idx), winner);
        }
    }
    placed
}
