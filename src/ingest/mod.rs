//! ingest — load a price series from delimited day partitions.
//!
//! Purpose
//! -------
//! Read one or more files in the semicolon-separated market-data layout
//! (`day;timestamp;product;…;mid_price;…`), keep the rows of one product,
//! and concatenate their values in partition order.
//!
//! Key behaviors
//! -------------
//! - Columns are located by header name, so extra or reordered columns are
//!   fine.
//! - Timestamps must strictly increase within each partition; they may
//!   restart in the next one.
//! - Values must parse to finite `f64`.
//!
//! Conventions
//! -----------
//! - Header names are compared after trimming whitespace.
//! - Line numbers in errors are 1-based and include the header line.

pub mod errors;

pub use self::errors::{IngestError, IngestResult};

use csv::{ReaderBuilder, StringRecord};
use ndarray::Array1;
use std::{
    fs::File,
    path::{Path, PathBuf},
};

/// Which rows and columns to read.
///
/// - `product`: keep only rows whose `product_column` equals this; `None`
///   keeps every row.
/// - `timestamp_column`, `value_column`: header names to parse.
/// - `delimiter`: field separator byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSelector {
    pub product: Option<String>,
    pub product_column: String,
    pub timestamp_column: String,
    pub value_column: String,
    pub delimiter: u8,
}

impl SeriesSelector {
    /// Selector for `product` with the default layout.
    pub fn for_product(product: &str) -> Self {
        SeriesSelector { product: Some(product.to_string()), ..SeriesSelector::default() }
    }

    pub fn with_value_column(mut self, column: &str) -> Self {
        self.value_column = column.to_string();
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Default for SeriesSelector {
    fn default() -> Self {
        SeriesSelector {
            product: None,
            product_column: "product".to_string(),
            timestamp_column: "timestamp".to_string(),
            value_column: "mid_price".to_string(),
            delimiter: b';',
        }
    }
}

/// Load and concatenate the selected series from `paths`, in order.
///
/// # Errors
/// - `NoPartitions` for an empty `paths`.
/// - `Io`, `Csv` for unreadable or malformed files.
/// - `MissingColumn`, `InvalidValue`, `NonMonotonicTimestamp` per
///   partition.
/// - `EmptySelection` when no row matched across all partitions.
pub fn load_partitions<P: AsRef<Path>>(
    paths: &[P], selector: &SeriesSelector,
) -> IngestResult<Array1<f64>> {
    if paths.is_empty() {
        return Err(IngestError::NoPartitions);
    }
    let mut values = Vec::new();
    for path in paths {
        let before = values.len();
        read_partition(path.as_ref(), selector, &mut values)?;
        log::debug!("{}: {} row(s) selected", path.as_ref().display(), values.len() - before);
    }
    if values.is_empty() {
        return Err(IngestError::EmptySelection { product: selector.product.clone() });
    }
    log::info!("loaded {} observation(s) from {} partition(s)", values.len(), paths.len());
    Ok(Array1::from(values))
}

fn column_index(headers: &StringRecord, name: &str, path: &Path) -> IngestResult<usize> {
    headers.iter().position(|h| h.trim() == name).ok_or_else(|| IngestError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })
}

fn read_partition(path: &Path, selector: &SeriesSelector, out: &mut Vec<f64>) -> IngestResult<()> {
    let file = File::open(path)
        .map_err(|source| IngestError::Io { path: path.to_path_buf(), source })?;
    let mut reader = ReaderBuilder::new()
        .delimiter(selector.delimiter)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let ts_idx = column_index(&headers, &selector.timestamp_column, path)?;
    let value_idx = column_index(&headers, &selector.value_column, path)?;
    let product_idx = match selector.product {
        Some(_) => Some(column_index(&headers, &selector.product_column, path)?),
        None => None,
    };

    let mut previous: Option<i64> = None;
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = i + 2;
        if let (Some(idx), Some(product)) = (product_idx, selector.product.as_deref()) {
            if record.get(idx) != Some(product) {
                continue;
            }
        }
        let invalid = |column: &str, value: &str| IngestError::InvalidValue {
            path: path.to_path_buf(),
            line,
            column: column.to_string(),
            value: value.to_string(),
        };

        let ts_raw = record.get(ts_idx).unwrap_or("");
        let ts: i64 = ts_raw.parse().map_err(|_| invalid(&selector.timestamp_column, ts_raw))?;
        if let Some(prev) = previous {
            if ts <= prev {
                return Err(IngestError::NonMonotonicTimestamp {
                    path: PathBuf::from(path),
                    line,
                    previous: prev,
                    current: ts,
                });
            }
        }
        previous = Some(ts);

        let raw = record.get(value_idx).unwrap_or("");
        let value: f64 = raw
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| invalid(&selector.value_column, raw))?;
        out.push(value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover product filtering, partition concatenation, and the
    // per-row failure modes.
    // -------------------------------------------------------------------------

    const HEADER: &str = "day;timestamp;product;bid_price_1;ask_price_1;mid_price;profit_and_loss";

    fn partition(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    // Purpose
    // -------
    // Rows of the selected product are kept and partitions are appended in
    // order; timestamps may restart between partitions.
    //
    // Given
    // -----
    // - Two partitions interleaving PEARLS and BANANAS.
    //
    // Expect
    // ------
    // - The BANANAS mid prices of day 1 then day 2.
    fn loads_selected_product_across_partitions() {
        let day1 = partition(&[
            "1;0;BANANAS;4894;4899;4896.5;0.0",
            "1;0;PEARLS;9998;10002;10000.0;0.0",
            "1;100;BANANAS;4895;4900;4897.5;0.0",
        ]);
        let day2 = partition(&[
            "2;0;BANANAS;4880;4885;4882.5;0.0",
            "2;100;PEARLS;9996;10004;10000.0;0.0",
        ]);

        let series =
            load_partitions(&[day1.path(), day2.path()], &SeriesSelector::for_product("BANANAS"))
                .unwrap();

        assert_eq!(series.to_vec(), vec![4896.5, 4897.5, 4882.5]);
    }

    #[test]
    // Purpose
    // -------
    // Structural and row-level problems surface as typed errors.
    //
    // Given
    // -----
    // - No paths; a missing product; an unparsable price; a repeated
    //   timestamp; a selector asking for an absent column.
    //
    // Expect
    // ------
    // - `NoPartitions`, `EmptySelection`, `InvalidValue { line: 3 }`,
    //   `NonMonotonicTimestamp`, `MissingColumn`.
    fn malformed_partitions_are_rejected() {
        let good = partition(&["1;0;BANANAS;1;2;1.5;0.0"]);
        let bad_value = partition(&["1;0;BANANAS;1;2;1.5;0.0", "1;100;BANANAS;1;2;abc;0.0"]);
        let repeated = partition(&["1;100;BANANAS;1;2;1.5;0.0", "1;100;BANANAS;1;2;1.5;0.0"]);
        let bananas = SeriesSelector::for_product("BANANAS");
        let no_paths: [&Path; 0] = [];

        assert!(matches!(
            load_partitions(&no_paths, &bananas).unwrap_err(),
            IngestError::NoPartitions
        ));
        assert!(matches!(
            load_partitions(&[good.path()], &SeriesSelector::for_product("PEARLS")).unwrap_err(),
            IngestError::EmptySelection { .. }
        ));
        assert!(matches!(
            load_partitions(&[bad_value.path()], &bananas).unwrap_err(),
            IngestError::InvalidValue { line: 3, .. }
        ));
        assert!(matches!(
            load_partitions(&[repeated.path()], &bananas).unwrap_err(),
            IngestError::NonMonotonicTimestamp { previous: 100, current: 100, .. }
        ));
        assert!(matches!(
            load_partitions(&[good.path()], &bananas.clone().with_value_column("close"))
                .unwrap_err(),
            IngestError::MissingColumn { .. }
        ));
    }
}
