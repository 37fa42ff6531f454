//! Host-side glue for the analysis engine: frame-file dispatch and a
//! plain-text density sink.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use gs_core::{load_frames_csv, load_frames_json, DensityDoc, DensitySink, FrameRow};

/// Load a frame file, dispatching on its extension (.csv, .json, .jsonl).
pub fn load_frames(path: &Path) -> Result<Vec<FrameRow>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match extension.as_str() {
        "csv" => load_frames_csv(path)
            .with_context(|| format!("failed to load CSV frames from {}", path.display()))?,
        "json" | "jsonl" | "ndjson" => load_frames_json(path)
            .with_context(|| format!("failed to load JSON frames from {}", path.display()))?,
        other => bail!("unsupported frame file extension: {:?}", other),
    };

    if rows.is_empty() {
        bail!("frame file {} contains no rows", path.display());
    }
    Ok(rows)
}

/// Intensity ramp from sparse to dense.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Character-grid density renderer: buckets samples into a fixed grid and
/// maps per-cell counts onto [`RAMP`]. The y axis points up, so rows are
/// emitted top-down from the max-y edge.
pub struct TextDensitySink<W: Write> {
    writer: W,
    columns: usize,
    rows: usize,
}

impl<W: Write> TextDensitySink<W> {
    pub fn new(writer: W, columns: usize, rows: usize) -> Self {
        Self {
            writer,
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DensitySink for TextDensitySink<W> {
    fn render(&mut self, doc: &DensityDoc) -> io::Result<()> {
        let Some(((min_x, min_y), (max_x, max_y))) = doc.bounds() else {
            return Ok(());
        };

        let span_x = (max_x - min_x).max(f64::EPSILON);
        let span_y = (max_y - min_y).max(f64::EPSILON);

        let mut cells = vec![0u32; self.columns * self.rows];
        for &(x, y) in &doc.samples {
            let col = (((x - min_x) / span_x) * (self.columns - 1) as f64).round() as usize;
            let row = (((y - min_y) / span_y) * (self.rows - 1) as f64).round() as usize;
            cells[row * self.columns + col] += 1;
        }
        let peak = cells.iter().copied().max().unwrap_or(0).max(1);

        writeln!(
            self.writer,
            "Presence density for {} ({}) in {} - {} samples",
            doc.team,
            doc.side,
            doc.area,
            doc.samples.len()
        )?;
        writeln!(
            self.writer,
            "x: {:.1}..{:.1}  y: {:.1}..{:.1}  peak cell: {}",
            min_x, max_x, min_y, max_y, peak
        )?;

        for row in (0..self.rows).rev() {
            let mut line = String::with_capacity(self.columns);
            for col in 0..self.columns {
                let count = cells[row * self.columns + col];
                let level = (count as usize * (RAMP.len() - 1)) / peak as usize;
                line.push(RAMP[level] as char);
            }
            writeln!(self.writer, "|{}|", line)?;
        }
        Ok(())
    }
}
