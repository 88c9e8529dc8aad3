use serde::{Serialize, Deserialize};

/// 1-based structure index as it appears in contact lists and matrix files.
pub type StructureId = usize;

/// Cluster id; `UNCLUSTERED` marks an element that belongs to no cluster.
pub type ClusterId = usize;

pub const UNCLUSTERED: ClusterId = 0;

/// Directional FCC scores for one unordered pair of structures (`i < k`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    pub i: StructureId,
    pub k: StructureId,
    /// Fraction of the contacts of `i` also found in `k`
    pub score_ik: f64,
    /// Fraction of the contacts of `k` also found in `i`
    pub score_ki: f64,
}

impl PairScore {
    pub fn new(i: StructureId, k: StructureId, score_ik: f64, score_ki: f64) -> Self {
        Self { i, k, score_ik, score_ki }
    }

    /// Formats the pair as one matrix row, without the trailing newline.
    pub fn to_row(&self) -> String {
        format!("{} {} {:.3} {:.3}", self.i, self.k, self.score_ik, self.score_ki)
    }
}
