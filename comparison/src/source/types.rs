use serde::{Deserialize, Serialize};

use crate::source::health::LiquidityTrend;

/// Corridor summary as delivered by the corridor detail endpoint.
///
/// Metric fields are optional: the payload comes from an external service
/// and conversion into a snapshot reports whichever one is absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CorridorRecord {
    pub id: String,
    #[serde(default)]
    pub source_asset: String,
    #[serde(default)]
    pub destination_asset: String,

    pub success_rate: Option<f64>,
    pub total_attempts: Option<i64>,
    pub successful_payments: Option<i64>,
    pub failed_payments: Option<i64>,

    pub average_latency_ms: Option<f64>,
    pub median_latency_ms: Option<f64>,
    pub p95_latency_ms: Option<f64>,
    pub p99_latency_ms: Option<f64>,

    pub liquidity_depth_usd: Option<f64>,
    pub liquidity_volume_24h_usd: Option<f64>,
    pub liquidity_trend: Option<String>,

    pub health_score: Option<f64>,
    pub avg_slippage_bps: Option<f64>,

    /// RFC 3339 timestamp of the upstream computation
    pub last_updated: Option<String>,
}

impl CorridorRecord {
    /// Parsed trend label; unknown labels read as `None`.
    pub fn trend(&self) -> Option<LiquidityTrend> {
        self.liquidity_trend.as_deref()?.parse().ok()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuccessRateDataPoint {
    pub timestamp: String,
    pub success_rate: f64,
    pub attempts: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatencyDataPoint {
    pub latency_bucket_ms: i32,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiquidityDataPoint {
    pub timestamp: String,
    pub liquidity_usd: f64,
    pub volume_24h_usd: f64,
}

/// Result of one `getCorridorDetail(id)` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorridorDetailData {
    pub corridor: CorridorRecord,
    #[serde(default)]
    pub historical_success_rate: Vec<SuccessRateDataPoint>,
    #[serde(default)]
    pub latency_distribution: Vec<LatencyDataPoint>,
    #[serde(default)]
    pub liquidity_trends: Vec<LiquidityDataPoint>,
    #[serde(default)]
    pub related_corridors: Option<Vec<CorridorRecord>>,
}
