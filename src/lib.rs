//! fccluster compares docking poses by the fraction of residue contacts
//! they share and groups them with an asymmetric Taylor-Butina disjoint
//! clustering. It provides loading of contact lists, the pairwise FCC
//! matrix, the neighbor graph built from it, and the clustering itself.

// Module declarations
pub mod error;
pub mod types;
pub mod config;
pub mod contacts;
pub mod matrix;
pub mod cluster;
pub mod pipeline;
pub mod utils;

// Re-exports
pub use error::{Error, Result};
pub use config::FccConfig;
pub use contacts::{ChainMode, ContactSets};
pub use matrix::{FccMatrix, MatrixWriter};
pub use cluster::{cluster_elements, include_false_singletons, Cluster, Clustering, NeighborGraph};
pub use types::{ClusterId, PairScore, StructureId, UNCLUSTERED};
