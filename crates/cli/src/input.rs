//! Site ingestion from tabular files (columns `x`, `y`).

use anyhow::{anyhow, Context, Result};
use fortune::Point;
use polars::prelude::*;
use std::path::Path;

/// Read sites from a CSV (default) or Parquet file (`.parquet` extension).
///
/// Integer columns are cast to `f64`. Rows with a missing coordinate are an error.
pub fn read_sites(path: &Path) -> Result<Vec<Point>> {
    let lf = match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => LazyFrame::scan_parquet(path, ScanArgsParquet::default())
            .with_context(|| format!("scanning {}", path.display()))?,
        _ => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()
            .with_context(|| format!("scanning {}", path.display()))?,
    };
    let df = lf
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading columns x,y from {}", path.display()))?;
    tracing::info!(rows = df.height(), "input_sites");
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys)
        .enumerate()
        .map(|(row, xy)| match xy {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(anyhow!("row {row}: missing coordinate")),
        })
        .collect()
}
