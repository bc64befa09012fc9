//! Loader -> renumber -> clean, driven by a [`ConvertConfig`].

use crate::config::ConvertConfig;
use crate::error::Result;
use crate::ingest::EdgeListLoader;
use crate::processor;
use crate::progress::Progress;
use crate::topology::GraphTopology;
use std::io::BufRead;
use std::path::Path;
use tracing::info;

/// Stage reported through the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Counting edge records
    Load,
    /// Counting vertices
    Clean,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub records: usize,
    pub slots_loaded: usize,
    pub vertices: usize,
    pub entries_loaded: usize,
    pub entries: usize,
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub topology: GraphTopology,
    pub stats: PipelineStats,
}

pub struct Pipeline<'a> {
    config: ConvertConfig,
    on_progress: Option<Box<dyn FnMut(Stage, usize) + 'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: ConvertConfig) -> Self {
        Self {
            config,
            on_progress: None,
        }
    }

    pub fn with_progress(mut self, callback: impl FnMut(Stage, usize) + 'a) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    pub fn run_path(&mut self, path: &Path) -> Result<PipelineOutput> {
        let mode = self.config.mode;
        let loader = EdgeListLoader::new(mode).with_progress(self.progress(Stage::Load));
        let outcome = loader.load_path(path)?;
        Ok(self.normalize(outcome.topology, outcome.records))
    }

    pub fn run<R: BufRead>(&mut self, reader: R) -> PipelineOutput {
        let mode = self.config.mode;
        let loader = EdgeListLoader::new(mode).with_progress(self.progress(Stage::Load));
        let outcome = loader.load(reader);
        self.normalize(outcome.topology, outcome.records)
    }

    fn normalize(&mut self, topology: GraphTopology, records: usize) -> PipelineOutput {
        let slots_loaded = topology.num_nodes();
        let entries_loaded = topology.num_edges();

        let mut topology = topology;
        if self.config.renumber {
            topology = processor::renumber(topology);
        }
        if self.config.clean {
            let mode = self.config.mode;
            let mut progress = self.progress(Stage::Clean);
            topology = processor::clean_with_progress(topology, mode, &mut progress);
        }

        let stats = PipelineStats {
            records,
            slots_loaded,
            vertices: topology.num_nodes(),
            entries_loaded,
            entries: topology.num_edges(),
        };
        info!(
            "Pipeline finished: {} records, {} vertices, {} adjacency entries",
            stats.records, stats.vertices, stats.entries
        );

        PipelineOutput { topology, stats }
    }

    fn progress(&mut self, stage: Stage) -> Progress<'_> {
        match self.on_progress.as_mut() {
            Some(callback) => Progress::every(self.config.progress_interval, move |n| {
                callback(stage, n)
            }),
            None => Progress::silent(),
        }
    }
}
