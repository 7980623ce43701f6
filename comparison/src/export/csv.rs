//! CSV export of a comparison.
//!
//! The file layout is a fixed external artifact:
//!
//! ```text
//! Corridor,Success Rate (%),Health Score,Avg Latency (ms),Liquidity Depth (USD),24h Volume (USD),Avg Slippage (bps),Total Attempts,Successful,Failed
//! USDC-XLM,94.50,92.0,487,6200000.00,850000.00,12.50,1678,1552,126
//! ```
//!
//! Rows follow the set's insertion order. Every float column rounds exact
//! ties up and prints zero without a sign. Nothing here touches storage;
//! callers persist [`CsvExport::content`] under [`CsvExport::filename`].

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{Span, debug, field, instrument, warn};

use crate::error::ComparisonError;
use crate::model::{ComparisonSet, CorridorMetricSnapshot};

pub const CSV_HEADER: [&str; 10] = [
    "Corridor",
    "Success Rate (%)",
    "Health Score",
    "Avg Latency (ms)",
    "Liquidity Depth (USD)",
    "24h Volume (USD)",
    "Avg Slippage (bps)",
    "Total Attempts",
    "Successful",
    "Failed",
];

const FILENAME_PREFIX: &str = "corridor-comparison-";

/// CSV text ready for download.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Serialize `set`, stamping the filename with the current UTC date.
pub fn to_csv(set: &ComparisonSet) -> Result<CsvExport, ComparisonError> {
    to_csv_at(set, Utc::now())
}

/// Serialize `set`, stamping the filename with `generated_at`.
///
/// Fails with `InvalidInput` on an empty set, and with the snapshot's
/// validation error when a row holds out-of-range or missing values.
#[instrument(
    target = "export",
    skip(set),
    fields(rows = set.len(), bytes = field::Empty)
)]
pub fn to_csv_at(
    set: &ComparisonSet,
    generated_at: DateTime<Utc>,
) -> Result<CsvExport, ComparisonError> {
    if set.is_empty() {
        warn!("refusing to export an empty comparison");
        return Err(ComparisonError::invalid("nothing to export: comparison is empty"));
    }

    let mut content = CSV_HEADER.join(",");
    content.push('\n');

    for snapshot in set {
        snapshot.validate()?;
        write_row(&mut content, snapshot);
    }

    let filename = export_filename(generated_at);

    Span::current().record("bytes", content.len());
    debug!(%filename, "comparison exported");

    Ok(CsvExport { filename, content })
}

/// `corridor-comparison-<YYYY-MM-DD>.csv`
pub fn export_filename(generated_at: DateTime<Utc>) -> String {
    format!(
        "{FILENAME_PREFIX}{}.csv",
        generated_at.date_naive().format("%Y-%m-%d")
    )
}

fn write_row(out: &mut String, s: &CorridorMetricSnapshot) {
    // write! into a String cannot fail.
    let _ = writeln!(
        out,
        "{},{},{},{},{},{},{},{},{},{}",
        escape_field(&s.id),
        fixed(s.success_rate_pct, 2),
        fixed(s.health_score, 1),
        fixed(s.avg_latency_ms, 0),
        fixed(s.liquidity_depth_usd, 2),
        fixed(s.volume_24h_usd, 2),
        fixed(s.avg_slippage_bps, 2),
        s.total_attempts,
        s.successful_count,
        s.failed_count,
    );
}

/// Format `v` with `decimals` digits, rounding exact ties up.
///
/// `{:.N}` alone rounds ties to even (`0.125` -> `0.12`), so the value is
/// rounded at the scaled magnitude first. Values are non-negative, so
/// `f64::round` (ties away from zero) is half-up here. Negative zero is
/// folded into zero so it never prints as `-0.00`.
pub(crate) fn fixed(v: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (v * scale).round() / scale + 0.0;
    format!("{rounded:.decimals$}")
}

/// Quote a field only when it contains a comma or a double quote.
pub(crate) fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
