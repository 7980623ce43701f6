//! Upstream health derivations.
//!
//! The ranking engine consumes `health_score` as delivered. These are the
//! formulas the corridor backend uses to produce it, for callers that need
//! to fill a score the fetch layer left out.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const SUCCESS_WEIGHT: f64 = 0.6;
const VOLUME_WEIGHT: f64 = 0.2;
const TRANSACTION_WEIGHT: f64 = 0.2;

/// `ln(volume)` at which the volume component saturates at 100
const VOLUME_LOG_SCALE: f64 = 15.0;

/// `ln(transactions)` at which the transaction component saturates at 100
const TRANSACTION_LOG_SCALE: f64 = 10.0;

const INCREASING_ABOVE_USD: f64 = 10_000_000.0;
const STABLE_ABOVE_USD: f64 = 1_000_000.0;

/// Composite 0..=100 health score.
///
/// ```text
/// 0.6 * success_rate
///   + 0.2 * min(100, ln(volume_usd) / 15 * 100)
///   + 0.2 * min(100, ln(total_transactions) / 10 * 100)
/// ```
/// Log components are 0 when their input is not positive.
pub fn calculate_health_score(success_rate: f64, total_transactions: u64, volume_usd: f64) -> f64 {
    let volume_score = log_component(volume_usd, VOLUME_LOG_SCALE);
    let transaction_score = log_component(total_transactions as f64, TRANSACTION_LOG_SCALE);

    let score = success_rate * SUCCESS_WEIGHT
        + volume_score * VOLUME_WEIGHT
        + transaction_score * TRANSACTION_WEIGHT;

    score.clamp(0.0, 100.0)
}

// ln(1) = 0, so tiny inputs can go negative; clamp at 0.
fn log_component(v: f64, scale: f64) -> f64 {
    if v > 0.0 {
        (v.ln() / scale * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiquidityTrend {
    Increasing,
    Stable,
    Decreasing,
}

impl LiquidityTrend {
    pub fn from_volume(volume_usd: f64) -> Self {
        if volume_usd > INCREASING_ABOVE_USD {
            LiquidityTrend::Increasing
        } else if volume_usd > STABLE_ABOVE_USD {
            LiquidityTrend::Stable
        } else {
            LiquidityTrend::Decreasing
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LiquidityTrend::Increasing => "increasing",
            LiquidityTrend::Stable => "stable",
            LiquidityTrend::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for LiquidityTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LiquidityTrend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increasing" => Ok(LiquidityTrend::Increasing),
            "stable" => Ok(LiquidityTrend::Stable),
            "decreasing" => Ok(LiquidityTrend::Decreasing),
            other => Err(format!("unknown liquidity trend {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_score_stays_in_range() {
        let score = calculate_health_score(95.0, 1000, 1_000_000.0);
        assert!(score > 0.0 && score <= 100.0);
    }

    #[test]
    fn health_score_is_success_weighted_without_activity() {
        let score = calculate_health_score(50.0, 0, 0.0);
        assert!((score - 30.0).abs() < 1e-9);
    }

    #[test]
    fn saturated_inputs_reach_full_score() {
        let score = calculate_health_score(100.0, 1_000_000, 1e12);
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn liquidity_trend_thresholds() {
        assert_eq!(LiquidityTrend::from_volume(15_000_000.0), LiquidityTrend::Increasing);
        assert_eq!(LiquidityTrend::from_volume(5_000_000.0), LiquidityTrend::Stable);
        assert_eq!(LiquidityTrend::from_volume(500_000.0), LiquidityTrend::Decreasing);
        assert_eq!(LiquidityTrend::from_volume(1_000_000.0), LiquidityTrend::Decreasing);
    }

    #[test]
    fn trend_parses_case_insensitively() {
        assert_eq!("Stable".parse::<LiquidityTrend>(), Ok(LiquidityTrend::Stable));
        assert!("sideways".parse::<LiquidityTrend>().is_err());
    }
}
