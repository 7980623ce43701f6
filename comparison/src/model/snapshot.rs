use serde::{Deserialize, Serialize};

use crate::error::ComparisonError;
use crate::metrics::MetricKey;

/// One corridor's metrics at comparison time.
///
/// Values are computed upstream and consumed as-is; this type only checks
/// that they are in range and that the attempt counts add up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorridorMetricSnapshot {
    /// Corridor id, e.g. `USDC-XLM`. Case-sensitive.
    pub id: String,

    /// Percentage of successful payments, 0..=100
    pub success_rate_pct: f64,

    /// Composite 0..=100 score
    pub health_score: f64,

    pub avg_latency_ms: f64,
    pub liquidity_depth_usd: f64,
    #[serde(rename = "volume24hUsd")]
    pub volume_24h_usd: f64,
    pub avg_slippage_bps: f64,

    pub total_attempts: u64,
    pub successful_count: u64,
    pub failed_count: u64,
}

impl CorridorMetricSnapshot {
    /// Numeric value of `metric` on this snapshot.
    pub fn value(&self, metric: MetricKey) -> f64 {
        match metric {
            MetricKey::SuccessRatePct => self.success_rate_pct,
            MetricKey::HealthScore => self.health_score,
            MetricKey::AvgLatencyMs => self.avg_latency_ms,
            MetricKey::LiquidityDepthUsd => self.liquidity_depth_usd,
            MetricKey::Volume24hUsd => self.volume_24h_usd,
            MetricKey::AvgSlippageBps => self.avg_slippage_bps,
        }
    }

    /// Check field ranges and the attempt-count invariant.
    ///
    /// Non-finite metric values are reported as missing: the snapshot comes
    /// from an uncontrolled fetch and NaN is how an absent number usually
    /// survives deserialization upstream.
    pub fn validate(&self) -> Result<(), ComparisonError> {
        if self.id.trim().is_empty() {
            return Err(ComparisonError::invalid("corridor id must not be empty"));
        }

        // Missing values win over range errors, whatever the field order.
        if let Some(metric) = MetricKey::ALL
            .into_iter()
            .find(|m| !self.value(*m).is_finite())
        {
            return Err(ComparisonError::MissingMetric {
                corridor_id: self.id.clone(),
                metric,
            });
        }

        for metric in MetricKey::ALL {
            let v = self.value(metric);

            if v < 0.0 {
                return Err(ComparisonError::invalid(format!(
                    "{}: {metric} must be non-negative, got {v}",
                    self.id
                )));
            }
        }

        for (metric, v) in [
            (MetricKey::SuccessRatePct, self.success_rate_pct),
            (MetricKey::HealthScore, self.health_score),
        ] {
            if v > 100.0 {
                return Err(ComparisonError::invalid(format!(
                    "{}: {metric} must be within 0..=100, got {v}",
                    self.id
                )));
            }
        }

        let counted = self.successful_count.checked_add(self.failed_count);
        if counted != Some(self.total_attempts) {
            return Err(ComparisonError::invalid(format!(
                "{}: successful ({}) + failed ({}) != total attempts ({})",
                self.id, self.successful_count, self.failed_count, self.total_attempts
            )));
        }

        Ok(())
    }
}
