//! Flat result artifacts
//!
//! The pipeline's summary table is a plain CSV with one row per
//! (mesh, method) pair, and seam tokens go to a text file with one
//! token per line. Both formats are trivially diffable, which is the
//! point.

use meshquant_algorithms::{ReconstructionRecord, SeamTokenSequence};
use meshquant_core::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column order of the results summary CSV
pub const SUMMARY_HEADER: &str = "mesh,method,mse,mae";

/// Write the reconstruction-error summary table
pub fn write_summary<P: AsRef<Path>>(records: &[ReconstructionRecord], path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", SUMMARY_HEADER)?;
    for record in records {
        writeln!(
            writer,
            "{},{},{:.8e},{:.8e}",
            record.mesh,
            record.method.name(),
            record.mse,
            record.mae
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a seam token sequence, one token per line
pub fn write_tokens<P: AsRef<Path>>(tokens: &SeamTokenSequence, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for token in tokens.iter() {
        writeln!(writer, "{}", token)?;
    }
    writer.flush()?;
    Ok(())
}
