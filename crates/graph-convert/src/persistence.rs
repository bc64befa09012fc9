//! Binary adjacency layout.
//!
//! ```text
//! i32 LE                  vertex count N
//! N x i32 LE              cumulative degree: entries in lists 0..=i
//! offset[N-1] x i32 LE    destination ids, list 0 first
//! offset[N-1] x f64 NE    weights, same order (weighted mode only)
//! ```
//!
//! Sections are packed back to back. The file does not record the mode, so
//! readers must be told whether the weight block is present.

use crate::error::{ConvertError, Result};
use crate::topology::{GraphTopology, Mode, DEFAULT_WEIGHT};
use byteorder::{LittleEndian, NativeEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use tracing::info;

/// Upper bound on speculative allocation driven by counts read from a file.
const PREALLOC_LIMIT: usize = 1 << 20;

pub fn write_binary<W: Write>(topology: &GraphTopology, mode: Mode, mut out: W) -> Result<()> {
    let count = to_i32("vertex count", topology.num_nodes())?;
    to_i32("adjacency entry count", topology.num_edges())?;
    let widest = topology.adj.iter().flatten().map(|&(dest, _)| dest).max();
    if let Some(dest) = widest.filter(|&dest| dest > i32::MAX as u32) {
        return Err(ConvertError::Overflow("vertex id", dest as u64));
    }

    out.write_i32::<LittleEndian>(count)?;

    let mut total: i32 = 0;
    for neighbors in &topology.adj {
        // Fits: the grand total was checked above.
        total += neighbors.len() as i32;
        out.write_i32::<LittleEndian>(total)?;
    }

    for &(dest, _) in topology.adj.iter().flatten() {
        out.write_i32::<LittleEndian>(dest as i32)?;
    }

    if mode.is_weighted() {
        for &(_, weight) in topology.adj.iter().flatten() {
            out.write_f64::<NativeEndian>(weight)?;
        }
    }

    out.flush()?;
    Ok(())
}

pub fn read_binary<R: Read>(mut input: R, mode: Mode) -> Result<GraphTopology> {
    let count = read_count(&mut input, "vertex count")?;

    let mut offsets = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    let mut previous = 0;
    for node in 0..count {
        let offset = read_count(&mut input, "degree offset")?;
        if offset < previous {
            return Err(ConvertError::Format(format!(
                "degree offset of vertex {} decreases ({} < {})",
                node, offset, previous
            )));
        }
        offsets.push(offset);
        previous = offset;
    }
    let total = previous;

    let mut dests = Vec::with_capacity(total.min(PREALLOC_LIMIT));
    for _ in 0..total {
        let dest = read_count(&mut input, "destination id")?;
        if dest >= count {
            return Err(ConvertError::Format(format!(
                "destination {} outside {} vertices",
                dest, count
            )));
        }
        dests.push(dest as u32);
    }

    let mut weights = Vec::new();
    if mode.is_weighted() {
        weights.reserve(total.min(PREALLOC_LIMIT));
        for _ in 0..total {
            weights.push(read_section(input.read_f64::<NativeEndian>(), "weight")?);
        }
    }

    let mut adj = Vec::with_capacity(offsets.len());
    let mut start = 0;
    for end in offsets {
        let list = (start..end)
            .map(|i| (dests[i], weights.get(i).copied().unwrap_or(DEFAULT_WEIGHT)))
            .collect();
        adj.push(list);
        start = end;
    }

    Ok(GraphTopology::from_adjacency(adj))
}

pub fn save_binary(topology: &GraphTopology, mode: Mode, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| ConvertError::open(path, e))?;
    write_binary(topology, mode, BufWriter::new(file))?;
    info!(
        "Binary graph saved to {} ({} vertices, {} entries)",
        path.display(),
        topology.num_nodes(),
        topology.num_edges()
    );
    Ok(())
}

pub fn load_binary(path: &Path, mode: Mode) -> Result<GraphTopology> {
    let file = File::open(path).map_err(|e| ConvertError::open(path, e))?;
    let topology = read_binary(BufReader::new(file), mode)?;
    info!("Binary graph loaded from {}", path.display());
    Ok(topology)
}

fn to_i32(what: &'static str, value: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| ConvertError::Overflow(what, value as u64))
}

fn read_count<R: Read>(input: &mut R, what: &str) -> Result<usize> {
    let value = read_section(input.read_i32::<LittleEndian>(), what)?;
    usize::try_from(value)
        .map_err(|_| ConvertError::Format(format!("negative {}: {}", what, value)))
}

fn read_section<T>(value: std::io::Result<T>, what: &str) -> Result<T> {
    value.map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            ConvertError::Format(format!("truncated while reading {}", what))
        }
        _ => ConvertError::Io(e),
    })
}
