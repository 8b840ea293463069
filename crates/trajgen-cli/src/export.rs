//! CSV export of ranked selections.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path as FsPath, PathBuf};
use trajgen_core::{Path, RankedSelection};

pub const CSV_HEADER: &str = "Waypoint,X,Y,Z";

/// Writes one `<prefix>_<n>.csv` per selected path, `n` starting at 1.
pub fn write_csv(selection: &RankedSelection, prefix: impl AsRef<FsPath>) -> Result<Vec<PathBuf>> {
    let prefix = prefix.as_ref();
    let mut written = Vec::with_capacity(selection.len());
    for (idx, path) in selection.paths.iter().enumerate() {
        let filename = csv_filename(prefix, idx + 1);
        let file = File::create(&filename)
            .with_context(|| format!("failed to create CSV file {}", filename.display()))?;
        let mut out = BufWriter::new(file);
        write_path(&mut out, path)?;
        out.flush()?;
        tracing::info!("Saved trajectory {} to {}", idx + 1, filename.display());
        written.push(filename);
    }
    Ok(written)
}

fn csv_filename(prefix: &FsPath, n: usize) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(format!("_{}.csv", n));
    PathBuf::from(name)
}

pub fn write_path<W: Write>(out: &mut W, path: &Path) -> Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for (idx, point) in path.points().iter().enumerate() {
        writeln!(out, "{},{},{},{}", idx, point.x, point.y, point.z)?;
    }
    Ok(())
}
