//! Corridor detail payloads from the fetch layer.
//!
//! The dashboard fetches one [`CorridorDetailData`] per selected corridor.
//! Only its `corridor` summary feeds the comparison; the time series are
//! carried along for callers that chart them.

pub mod filter;
pub mod health;
pub mod types;

use tracing::{debug, warn};

use crate::error::ComparisonError;
use crate::metrics::MetricKey;
use crate::model::CorridorMetricSnapshot;
pub use crate::source::filter::CorridorFilter;
pub use crate::source::types::{
    CorridorDetailData, CorridorRecord, LatencyDataPoint, LiquidityDataPoint,
    SuccessRateDataPoint,
};

/// Parse a JSON array of corridor detail payloads.
pub fn parse_payload(json: &str) -> Result<Vec<CorridorDetailData>, ComparisonError> {
    serde_json::from_str(json)
        .map_err(|e| ComparisonError::invalid(format!("malformed corridor payload: {e}")))
}

/// Convert every payload into a validated snapshot, keeping payload order.
pub fn snapshots_from_payload(
    details: &[CorridorDetailData],
) -> Result<Vec<CorridorMetricSnapshot>, ComparisonError> {
    let snapshots = details
        .iter()
        .map(CorridorMetricSnapshot::try_from)
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|e| warn!(error = %e, "corridor payload rejected"))?;

    debug!(count = snapshots.len(), "corridor payload converted");
    Ok(snapshots)
}

impl CorridorRecord {
    /// Fill an absent `health_score` from success rate, attempts and volume.
    ///
    /// Returns `true` when a score was derived. Records that lack the inputs
    /// are left untouched so conversion still reports what is missing.
    pub fn fill_derived_health(&mut self) -> bool {
        if self.health_score.is_some() {
            return false;
        }

        let (Some(rate), Some(attempts), Some(volume)) = (
            self.success_rate,
            self.total_attempts,
            self.liquidity_volume_24h_usd,
        ) else {
            return false;
        };

        let score = health::calculate_health_score(rate, attempts.max(0) as u64, volume);
        debug!(corridor_id = %self.id, score, "derived missing health score");
        self.health_score = Some(score);
        true
    }
}

impl TryFrom<&CorridorRecord> for CorridorMetricSnapshot {
    type Error = ComparisonError;

    fn try_from(r: &CorridorRecord) -> Result<Self, Self::Error> {
        let missing = |metric: MetricKey| ComparisonError::MissingMetric {
            corridor_id: r.id.clone(),
            metric,
        };

        let snapshot = CorridorMetricSnapshot {
            id: r.id.clone(),
            success_rate_pct: r.success_rate.ok_or_else(|| missing(MetricKey::SuccessRatePct))?,
            health_score: r.health_score.ok_or_else(|| missing(MetricKey::HealthScore))?,
            avg_latency_ms: r.average_latency_ms.ok_or_else(|| missing(MetricKey::AvgLatencyMs))?,
            liquidity_depth_usd: r
                .liquidity_depth_usd
                .ok_or_else(|| missing(MetricKey::LiquidityDepthUsd))?,
            volume_24h_usd: r
                .liquidity_volume_24h_usd
                .ok_or_else(|| missing(MetricKey::Volume24hUsd))?,
            avg_slippage_bps: r.avg_slippage_bps.ok_or_else(|| missing(MetricKey::AvgSlippageBps))?,
            total_attempts: count(&r.id, "total_attempts", r.total_attempts)?,
            successful_count: count(&r.id, "successful_payments", r.successful_payments)?,
            failed_count: count(&r.id, "failed_payments", r.failed_payments)?,
        };

        snapshot.validate()?;
        Ok(snapshot)
    }
}

impl TryFrom<&CorridorDetailData> for CorridorMetricSnapshot {
    type Error = ComparisonError;

    fn try_from(d: &CorridorDetailData) -> Result<Self, Self::Error> {
        CorridorMetricSnapshot::try_from(&d.corridor)
    }
}

fn count(id: &str, field: &str, v: Option<i64>) -> Result<u64, ComparisonError> {
    let v = v.ok_or_else(|| ComparisonError::invalid(format!("{id}: {field} is missing")))?;
    u64::try_from(v)
        .map_err(|_| ComparisonError::invalid(format!("{id}: {field} must be non-negative, got {v}")))
}
