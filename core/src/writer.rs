//! Trajectory CSV writer.
//!
//! Format: a `step, position` header (`time, position` for physical
//! time) followed by one `<time>, <position>` line per sample.

use crate::{config::TimeUnits, error::SimResult, output::SimulationOutput};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_trajectory<W: Write>(mut out: W, output: &SimulationOutput) -> SimResult<()> {
    let time_column = match output.time_units {
        TimeUnits::Steps    => "step",
        TimeUnits::Physical => "time",
    };
    writeln!(out, "{time_column}, position")?;
    for (time, position) in output.iter() {
        writeln!(out, "{time}, {position}")?;
    }
    out.flush()?;
    Ok(())
}

/// Write to `path`, truncating any existing file.
pub fn write_trajectory_file(path: impl AsRef<Path>, output: &SimulationOutput) -> SimResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_trajectory(BufWriter::new(file), output)?;
    log::info!("wrote {} samples to {}", output.len(), path.display());
    Ok(())
}
