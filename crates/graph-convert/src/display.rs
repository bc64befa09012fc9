use crate::error::Result;
use crate::topology::{GraphTopology, Mode};
use std::io::Write;

/// Writes one `src dest [weight]` line per adjacency entry, vertex by vertex.
///
/// Weights use the shortest representation that parses back to the same
/// value, so the dump can be fed to the loader again. This differs from a
/// fixed six-significant-digit rendering: `1234567` prints as `1234567`,
/// not `1.23457e+06`.
pub fn write_text<W: Write>(topology: &GraphTopology, mode: Mode, mut out: W) -> Result<()> {
    for (src, neighbors) in topology.adj.iter().enumerate() {
        for &(dest, weight) in neighbors {
            if mode.is_weighted() {
                writeln!(out, "{} {} {}", src, dest, weight)?;
            } else {
                writeln!(out, "{} {}", src, dest)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
