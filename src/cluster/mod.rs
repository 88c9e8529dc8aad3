// cluster/mod.rs
pub mod graph;
pub mod disjoint;
pub mod singletons;
pub mod output;
pub mod pretty;

pub use self::graph::{Element, GraphBuilder, NeighborGraph};
pub use self::disjoint::{cluster_elements, Cluster, Clustering};
pub use self::singletons::{find_false_singletons, include_false_singletons};
pub use self::output::{read_clusters, write_clusters, ClusterRecord, ClusteringSummary};
