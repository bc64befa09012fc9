use anyhow::{Context, Result};
use clap::Parser;
use graph_convert::{display, persistence, ConvertConfig, Mode, Pipeline};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::trace;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "graph-convert",
    version,
    about = "Convert an edge list into a compacted, deduplicated adjacency graph"
)]
struct Cli {
    /// Edge list to read (`-` for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Write the binary adjacency layout here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a text dump here (`-` for stdout)
    #[arg(long)]
    text: Option<PathBuf>,

    /// Records carry a third weight column
    #[arg(short, long)]
    weighted: bool,

    /// Keep isolated vertices and original identifiers
    #[arg(long)]
    no_renumber: bool,

    /// Keep parallel edges
    #[arg(long)]
    no_clean: bool,

    /// JSON file with default settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report progress every N records (0 to disable)
    #[arg(long)]
    progress_interval: Option<usize>,
}

impl Cli {
    fn resolve_config(&self) -> Result<ConvertConfig> {
        let mut config = match &self.config {
            Some(path) => ConvertConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config: {:?}", path))?,
            None => ConvertConfig::default(),
        };
        if self.weighted {
            config.mode = Mode::Weighted;
        }
        if self.no_renumber {
            config.renumber = false;
        }
        if self.no_clean {
            config.clean = false;
        }
        if let Some(interval) = self.progress_interval {
            config.progress_interval = interval;
        }
        Ok(config)
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("graph_convert=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let mode = config.mode;

    let mut pipeline =
        Pipeline::new(config).with_progress(|stage, n| trace!("{:?}: {} processed", stage, n));
    let output = pipeline
        .run_path(&cli.input)
        .with_context(|| format!("Failed to convert {:?}", cli.input))?;

    if let Some(path) = &cli.text {
        if path.as_os_str() == "-" {
            display::write_text(&output.topology, mode, io::stdout().lock())?;
        } else {
            let file = File::create(path)
                .with_context(|| format!("Failed to create text output: {:?}", path))?;
            let mut out = BufWriter::new(file);
            display::write_text(&output.topology, mode, &mut out)?;
            out.flush()?;
        }
    }

    if let Some(path) = &cli.output {
        persistence::save_binary(&output.topology, mode, path)
            .with_context(|| format!("Failed to write binary output: {:?}", path))?;
    }

    Ok(())
}
