use crate::error::{ConvertError, Result};
use crate::progress::Progress;
use crate::topology::{GraphTopology, Mode};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

pub mod extractor;

use extractor::{extractor_for, Tokens};

/// What the loader produced, plus how many records it accepted.
///
/// A malformed record ends ingestion just like end of input, so `records`
/// is the only way for a caller to notice a truncated edge list.
#[derive(Debug)]
pub struct LoadOutcome {
    pub topology: GraphTopology,
    pub records: usize,
}

/// Reads an edge list into an adjacency store.
pub struct EdgeListLoader<'a> {
    mode: Mode,
    progress: Progress<'a>,
}

impl<'a> EdgeListLoader<'a> {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            progress: Progress::silent(),
        }
    }

    pub fn with_progress(mut self, progress: Progress<'a>) -> Self {
        self.progress = progress;
        self
    }

    /// Loads from a file path, or standard input when the path is `-`.
    pub fn load_path(self, path: &Path) -> Result<LoadOutcome> {
        if path == Path::new("-") {
            let stdin = io::stdin();
            return Ok(self.load(stdin.lock()));
        }

        let file = File::open(path).map_err(|e| ConvertError::open(path, e))?;
        info!("Loading edge list from {}", path.display());
        Ok(self.load(BufReader::new(file)))
    }

    /// Consumes records until the stream can no longer produce a complete one.
    pub fn load<R: BufRead>(mut self, reader: R) -> LoadOutcome {
        let extractor = extractor_for(self.mode);
        let mut tokens = Tokens::new(reader);
        let mut topology = GraphTopology::new();
        let mut records = 0;

        loop {
            self.progress.tick(records);
            let Some(record) = extractor.extract(&mut tokens) else {
                break;
            };
            topology.add_edge(record.src, record.dest, record.weight);
            records += 1;
        }

        debug!(
            "Ingestion stopped after {} records ({:?} mode)",
            records, self.mode
        );
        info!(
            "Loaded {} edges over {} vertex slots",
            records,
            topology.num_nodes()
        );

        LoadOutcome { topology, records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(text: &str, mode: Mode) -> LoadOutcome {
        EdgeListLoader::new(mode).load(Cursor::new(text.as_bytes()))
    }

    #[test]
    fn test_triangle_is_symmetric() {
        let outcome = load("0 1\n1 2\n0 2\n", Mode::Unweighted);
        let graph = outcome.topology;

        assert_eq!(outcome.records, 3);
        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.adjacency(0), &[(1, 1.0), (2, 1.0)]);
        assert_eq!(graph.adjacency(1), &[(0, 1.0), (2, 1.0)]);
        assert_eq!(graph.adjacency(2), &[(1, 1.0), (0, 1.0)]);
        assert!(graph.is_symmetric());
    }

    #[test]
    fn test_parallel_weighted_edges_are_kept_raw() {
        let graph = load("0 1 2.0\n0 1 3.0\n", Mode::Weighted).topology;
        assert_eq!(graph.adjacency(0), &[(1, 2.0), (1, 3.0)]);
        assert_eq!(graph.adjacency(1), &[(0, 2.0), (0, 3.0)]);
    }

    #[test]
    fn test_grows_to_largest_identifier() {
        let graph = load("0 5\n", Mode::Unweighted).topology;
        assert_eq!(graph.num_nodes(), 6);
        assert!(graph.adjacency(3).is_empty());
    }

    #[test]
    fn test_malformed_record_stops_ingestion() {
        let outcome = load("0 1\n1 x\n2 3\n", Mode::Unweighted);
        assert_eq!(outcome.records, 1);
        assert_eq!(outcome.topology.num_nodes(), 2);
    }

    #[test]
    fn test_trailing_partial_record_is_dropped() {
        let outcome = load("0 1 0.5\n1 2", Mode::Weighted);
        assert_eq!(outcome.records, 1);
        assert_eq!(outcome.topology.num_edges(), 2);
    }

    /// Hands out a few bytes per call, then fails as if the stream was closed.
    struct ClosingReader {
        data: &'static [u8],
        pos: usize,
    }

    impl std::io::Read for ClosingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.data.len() {
                return Err(io::Error::other("closed"));
            }
            let n = buf.len().min(3).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn test_read_error_ends_ingestion_with_partial_result() {
        let reader = ClosingReader {
            data: b"0 1\n1 2\n2 3",
            pos: 0,
        };
        let outcome = EdgeListLoader::new(Mode::Unweighted).load(BufReader::new(reader));

        assert_eq!(outcome.records, 2);
        assert_eq!(outcome.topology.num_nodes(), 3);
        assert!(outcome.topology.is_symmetric());
        assert_eq!(outcome.topology.adjacency(2), &[(1, 1.0)]);
        assert_eq!(outcome.topology.degree(3), 0);
    }

    #[test]
    fn test_empty_input() {
        let outcome = load("", Mode::Weighted);
        assert_eq!(outcome.records, 0);
        assert_eq!(outcome.topology.num_nodes(), 0);
    }

    #[test]
    fn test_progress_does_not_change_result() {
        let mut ticks = Vec::new();
        let outcome = EdgeListLoader::new(Mode::Unweighted)
            .with_progress(Progress::every(2, |n| ticks.push(n)))
            .load(Cursor::new("0 1\n1 2\n2 3\n".as_bytes()));

        assert_eq!(outcome.records, 3);
        assert_eq!(ticks, vec![0, 2]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = EdgeListLoader::new(Mode::Unweighted)
            .load_path(Path::new("/nonexistent/graph-convert/edges.txt"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::Open { .. }));
    }
}
