//! Normalisation passes over a loaded adjacency store.
//!
//! [`renumber`] drops isolated vertices and compacts identifiers,
//! [`clean`] merges parallel edges. Both take the store by value and hand
//! back its replacement.

use crate::progress::Progress;
use crate::topology::{GraphTopology, Mode};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Removes isolated vertices and reassigns the survivors to `[0, M)`,
/// preserving their relative order.
pub fn renumber(topology: GraphTopology) -> GraphTopology {
    renumber_with_map(topology).0
}

/// Same as [`renumber`], also returning the old-to-new identifier table
/// (`None` for dropped vertices).
///
/// A neighbor id at or beyond the slot count grows the store first, as the
/// loader would have, so it is renumbered like any other linked vertex.
pub fn renumber_with_map(topology: GraphTopology) -> (GraphTopology, Vec<Option<u32>>) {
    let mut topology = topology;
    let widest = topology.adj.iter().flatten().map(|&(n, _)| n as usize + 1).max();
    if let Some(size) = widest.filter(|&size| size > topology.num_nodes()) {
        warn!(
            "Neighbor ids exceed {} slots, growing to {}",
            topology.num_nodes(),
            size
        );
        topology.ensure_capacity(size);
    }

    let mut adj = topology.into_inner();
    let before = adj.len();

    let mut linked = vec![false; before];
    for (node, neighbors) in adj.iter().enumerate() {
        if !neighbors.is_empty() {
            linked[node] = true;
        }
        for &(neighbor, _) in neighbors {
            linked[neighbor as usize] = true;
        }
    }

    let mut renum = vec![None; before];
    let mut next: u32 = 0;
    for (node, &is_linked) in linked.iter().enumerate() {
        if is_linked {
            renum[node] = Some(next);
            next += 1;
        }
    }

    // New ids never exceed old ones, so moving lists downwards in ascending
    // order never overwrites a list that still has to be moved.
    for old in 0..before {
        let Some(new) = renum[old] else {
            continue;
        };
        let mut neighbors = std::mem::take(&mut adj[old]);
        for entry in neighbors.iter_mut() {
            if let Some(id) = renum[entry.0 as usize] {
                entry.0 = id;
            }
        }
        adj[new as usize] = neighbors;
    }
    adj.truncate(next as usize);

    info!(
        "Renumbered vertices: {} slots -> {} linked vertices",
        before, next
    );

    (GraphTopology::from_adjacency(adj), renum)
}

/// Collapses parallel edges so each neighbor appears at most once per list.
///
/// Weighted mode sums the weights of collapsed entries; unweighted mode keeps
/// the first one. Lists come out ordered by neighbor id.
pub fn clean(topology: GraphTopology, mode: Mode) -> GraphTopology {
    clean_with_progress(topology, mode, &mut Progress::silent())
}

pub fn clean_with_progress(
    topology: GraphTopology,
    mode: Mode,
    progress: &mut Progress<'_>,
) -> GraphTopology {
    let mut adj = topology.into_inner();
    let before: usize = adj.iter().map(Vec::len).sum();

    for (node, neighbors) in adj.iter_mut().enumerate() {
        progress.tick(node);

        let mut merged: BTreeMap<u32, f64> = BTreeMap::new();
        for &(neighbor, weight) in neighbors.iter() {
            merged
                .entry(neighbor)
                .and_modify(|total| {
                    if mode.is_weighted() {
                        *total += weight;
                    }
                })
                .or_insert(weight);
        }
        *neighbors = merged.into_iter().collect();
    }

    let after: usize = adj.iter().map(Vec::len).sum();
    debug!("Merged {} parallel adjacency entries", before - after);
    info!("Cleaned adjacency lists: {} -> {} entries", before, after);

    GraphTopology::from_adjacency(adj)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(u32, u32, f64)]) -> GraphTopology {
        let mut topology = GraphTopology::new();
        for &(src, dest, weight) in edges {
            topology.add_edge(src, dest, weight);
        }
        topology
    }

    #[test]
    fn test_renumber_keeps_dense_graph() {
        let before = graph(&[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.0)]);
        let after = renumber(before.clone());
        assert_eq!(after, before);
    }

    #[test]
    fn test_renumber_drops_isolated_slots() {
        let (after, map) = renumber_with_map(graph(&[(0, 1, 1.0), (1, 2, 1.0), (2, 5, 4.0)]));

        assert_eq!(after.num_nodes(), 4);
        assert_eq!(map, vec![Some(0), Some(1), Some(2), None, None, Some(3)]);
        assert_eq!(after.adjacency(2), &[(1, 1.0), (3, 4.0)]);
        assert_eq!(after.adjacency(3), &[(2, 4.0)]);
        assert!(after.is_symmetric());
    }

    #[test]
    fn test_renumber_keeps_self_loop_only_vertex() {
        let after = renumber(graph(&[(3, 3, 1.0), (6, 7, 1.0)]));

        assert_eq!(after.num_nodes(), 3);
        assert_eq!(after.adjacency(0), &[(0, 1.0), (0, 1.0)]);
        assert_eq!(after.adjacency(1), &[(2, 1.0)]);
        assert_eq!(after.adjacency(2), &[(1, 1.0)]);
    }

    #[test]
    fn test_renumber_grows_for_out_of_range_neighbor() {
        let dangling = GraphTopology::from_adjacency(vec![vec![(5, 1.0)]]);
        let (after, map) = renumber_with_map(dangling);

        assert_eq!(map.len(), 6);
        assert_eq!(map[0], Some(0));
        assert_eq!(map[5], Some(1));
        assert_eq!(after.num_nodes(), 2);
        assert_eq!(after.adjacency(0), &[(1, 1.0)]);
        assert!(after.adjacency(1).is_empty());
    }

    #[test]
    fn test_renumber_empty() {
        let after = renumber(GraphTopology::from_adjacency(vec![Vec::new(); 4]));
        assert_eq!(after.num_nodes(), 0);
    }

    #[test]
    fn test_clean_sums_weighted_parallel_edges() {
        let after = clean(graph(&[(0, 1, 2.0), (0, 1, 3.0)]), Mode::Weighted);
        assert_eq!(after.adjacency(0), &[(1, 5.0)]);
        assert_eq!(after.adjacency(1), &[(0, 5.0)]);
    }

    #[test]
    fn test_clean_unweighted_keeps_first_occurrence() {
        let after = clean(graph(&[(0, 1, 1.0), (0, 1, 1.0), (0, 2, 1.0)]), Mode::Unweighted);
        assert_eq!(after.adjacency(0), &[(1, 1.0), (2, 1.0)]);
        assert_eq!(after.adjacency(1), &[(0, 1.0)]);
    }

    #[test]
    fn test_clean_sorts_by_neighbor() {
        let after = clean(graph(&[(0, 3, 1.0), (0, 1, 1.0), (0, 2, 1.0)]), Mode::Unweighted);
        let order: Vec<u32> = after.neighbors(0).map(|(n, _)| n).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_clean_merges_self_loop_sides() {
        let after = clean(graph(&[(0, 0, 1.5)]), Mode::Weighted);
        assert_eq!(after.adjacency(0), &[(0, 3.0)]);
    }

    #[test]
    fn test_clean_keeps_asymmetric_weights() {
        let skewed = GraphTopology::from_adjacency(vec![
            vec![(1, 1.0), (1, 2.0)],
            vec![(0, 1.0)],
        ]);
        let after = clean(skewed, Mode::Weighted);
        assert_eq!(after.adjacency(0), &[(1, 3.0)]);
        assert_eq!(after.adjacency(1), &[(0, 1.0)]);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let once = clean(
            graph(&[(0, 1, 0.25), (1, 0, 0.5), (2, 1, 1.0), (2, 2, 2.0)]),
            Mode::Weighted,
        );
        let twice = clean(once.clone(), Mode::Weighted);
        assert_eq!(once, twice);
    }
}
