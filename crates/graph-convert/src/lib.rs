pub mod topology {
    use serde::{Deserialize, Serialize};

    /// Whether edge records carry a weight column.
    ///
    /// Fixed for a whole run: it selects the input record shape, whether
    /// parallel edges are summed or collapsed, and whether weights are
    /// written out.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Mode {
        Weighted,
        #[default]
        Unweighted,
    }

    /// Weight given to records that do not carry one.
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    impl Mode {
        pub fn is_weighted(self) -> bool {
            matches!(self, Mode::Weighted)
        }
    }

    /// An undirected graph stored as an adjacency list indexed by vertex id.
    /// Every edge is stored twice, once per endpoint.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct GraphTopology {
        /// Adjacency list: NodeID -> Vec<(NeighborID, Weight)>
        pub adj: Vec<Vec<(u32, f64)>>,
    }

    impl GraphTopology {
        pub fn new() -> Self {
            Self { adj: Vec::new() }
        }

        /// Wraps prebuilt lists as-is. Callers are expected to keep every
        /// neighbor id below `adj.len()` and to mirror each entry; nothing
        /// here checks either.
        pub fn from_adjacency(adj: Vec<Vec<(u32, f64)>>) -> Self {
            Self { adj }
        }

        pub fn num_nodes(&self) -> usize {
            self.adj.len()
        }

        /// Number of directed adjacency entries (each undirected edge counts twice).
        pub fn num_edges(&self) -> usize {
            self.adj.iter().map(|neighbors| neighbors.len()).sum()
        }

        pub fn degree(&self, node_id: u32) -> usize {
            self.adjacency(node_id).len()
        }

        pub fn adjacency(&self, node_id: u32) -> &[(u32, f64)] {
            self.adj
                .get(node_id as usize)
                .map(Vec::as_slice)
                .unwrap_or(&[])
        }

        pub fn neighbors(&self, node_id: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
            self.adj.get(node_id as usize).into_iter().flatten().cloned()
        }

        /// Adds an undirected edge, growing the store to hold both endpoints.
        pub fn add_edge(&mut self, src: u32, dest: u32, weight: f64) {
            self.ensure_capacity(src.max(dest) as usize + 1);
            self.adj[src as usize].push((dest, weight));
            self.adj[dest as usize].push((src, weight));
        }

        pub fn ensure_capacity(&mut self, size: usize) {
            if size > self.adj.len() {
                self.adj.resize(size, Vec::new());
            }
        }

        /// True when every entry `(w, _)` in `v`'s list has a matching `(v, _)` in `w`'s list.
        pub fn is_symmetric(&self) -> bool {
            self.adj.iter().enumerate().all(|(v, neighbors)| {
                neighbors.iter().all(|&(w, _)| {
                    self.adjacency(w)
                        .iter()
                        .any(|&(back, _)| back as usize == v)
                })
            })
        }

        pub fn into_inner(self) -> Vec<Vec<(u32, f64)>> {
            self.adj
        }
    }
}

pub mod config;
pub mod display;
pub mod error;
pub mod ingest;
pub mod persistence;
pub mod pipeline;
pub mod processor;
pub mod progress;

pub use config::ConvertConfig;
pub use error::{ConvertError, Result};
pub use ingest::{EdgeListLoader, LoadOutcome};
pub use pipeline::{Pipeline, PipelineOutput, PipelineStats, Stage};
pub use topology::{GraphTopology, Mode};
