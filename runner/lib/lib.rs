//! Shared output helpers for the scenario binaries.
//!
//! Everything is plain CSV/JSON on the filesystem so the results can be
//! picked up by any plotting tool.

use std::fs;
use std::io::{ BufWriter, Write };
use std::path::Path;
use anyhow::{ Context, Result };

/// Create `dir` (and parents) if it does not exist yet.
pub fn ensure_outdir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}

/// Write equal-length columns as a CSV file with a header row.
///
/// Columns of unequal length are truncated to the shortest.
pub fn write_columns_csv(
    path: &Path,
    headers: &[&str],
    columns: &[&[f64]],
) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{}", headers.join(","))?;
    let rows = columns.iter().map(|c| c.len()).min().unwrap_or(0);
    for i in 0..rows {
        for (j, col) in columns.iter().enumerate() {
            if j > 0 { write!(out, ",")?; }
            write!(out, "{:.12e}", col[i])?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Write a serializable value as pretty-printed JSON.
pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text)
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_zipped_row_wise() {
        let dir = std::env::temp_dir().join("runner-csv-test");
        ensure_outdir(&dir).unwrap();
        let path = dir.join("cols.csv");
        write_columns_csv(&path, &["a", "b"], &[&[1.0, 2.0], &[3.0, 4.0, 5.0]])
            .unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "a,b");
        assert_eq!(lines.len(), 3, "truncated to the shortest column");
        assert!(lines[1].starts_with("1.0"));
    }
}
