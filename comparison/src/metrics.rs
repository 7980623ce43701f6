//! Metric definition table.
//!
//! The six corridor metrics compared side by side, each with a display label,
//! a unit and a direction telling the ranking engine which end of the scale
//! is "good". The table is configuration: callers may pass a subset or a
//! reordered copy to [`crate::ranking::rank`], but the default is
//! [`METRIC_DEFINITIONS`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which end of a metric's scale is better.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

impl Direction {
    /// Map a raw value onto a scale where larger always means better.
    ///
    /// Negation is exact in IEEE-754, so ranking oriented values gives the
    /// same result as ranking the raw values with the comparison flipped.
    pub fn orient(self, value: f64) -> f64 {
        match self {
            Direction::HigherIsBetter => value,
            Direction::LowerIsBetter => -value,
        }
    }
}

/// Identifies one comparable metric on a corridor snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    SuccessRatePct,
    HealthScore,
    AvgLatencyMs,
    LiquidityDepthUsd,
    #[serde(rename = "volume24hUsd")]
    Volume24hUsd,
    AvgSlippageBps,
}

impl MetricKey {
    pub const ALL: [MetricKey; 6] = [
        MetricKey::SuccessRatePct,
        MetricKey::HealthScore,
        MetricKey::AvgLatencyMs,
        MetricKey::LiquidityDepthUsd,
        MetricKey::Volume24hUsd,
        MetricKey::AvgSlippageBps,
    ];

    /// Field name as it appears on the snapshot's serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::SuccessRatePct => "successRatePct",
            MetricKey::HealthScore => "healthScore",
            MetricKey::AvgLatencyMs => "avgLatencyMs",
            MetricKey::LiquidityDepthUsd => "liquidityDepthUsd",
            MetricKey::Volume24hUsd => "volume24hUsd",
            MetricKey::AvgSlippageBps => "avgSlippageBps",
        }
    }

    /// Definition of this metric in the default table.
    pub fn definition(self) -> &'static MetricDefinition {
        // ALL and METRIC_DEFINITIONS share an order.
        &METRIC_DEFINITIONS[self as usize]
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MetricDefinition {
    pub key: MetricKey,
    pub label: &'static str,
    /// Display unit; empty for unitless scores.
    pub unit: &'static str,
    pub direction: Direction,
}

impl MetricDefinition {
    /// Label with unit suffix, e.g. `Avg Latency (ms)`.
    pub fn heading(&self) -> String {
        if self.unit.is_empty() {
            self.label.to_string()
        } else {
            format!("{} ({})", self.label, self.unit)
        }
    }
}

pub const METRIC_DEFINITIONS: [MetricDefinition; 6] = [
    MetricDefinition {
        key: MetricKey::SuccessRatePct,
        label: "Success Rate",
        unit: "%",
        direction: Direction::HigherIsBetter,
    },
    MetricDefinition {
        key: MetricKey::HealthScore,
        label: "Health Score",
        unit: "",
        direction: Direction::HigherIsBetter,
    },
    MetricDefinition {
        key: MetricKey::AvgLatencyMs,
        label: "Avg Latency",
        unit: "ms",
        direction: Direction::LowerIsBetter,
    },
    MetricDefinition {
        key: MetricKey::LiquidityDepthUsd,
        label: "Liquidity Depth",
        unit: "USD",
        direction: Direction::HigherIsBetter,
    },
    MetricDefinition {
        key: MetricKey::Volume24hUsd,
        label: "24h Volume",
        unit: "USD",
        direction: Direction::HigherIsBetter,
    },
    MetricDefinition {
        key: MetricKey::AvgSlippageBps,
        label: "Avg Slippage",
        unit: "bps",
        direction: Direction::LowerIsBetter,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_key_order() {
        for (i, key) in MetricKey::ALL.iter().enumerate() {
            assert_eq!(METRIC_DEFINITIONS[i].key, *key);
            assert_eq!(key.definition().key, *key);
        }
    }

    #[test]
    fn latency_and_slippage_are_lower_is_better() {
        let lower: Vec<MetricKey> = METRIC_DEFINITIONS
            .iter()
            .filter(|d| d.direction == Direction::LowerIsBetter)
            .map(|d| d.key)
            .collect();

        assert_eq!(lower, vec![MetricKey::AvgLatencyMs, MetricKey::AvgSlippageBps]);
    }

    #[test]
    fn headings_carry_units() {
        assert_eq!(MetricKey::AvgLatencyMs.definition().heading(), "Avg Latency (ms)");
        assert_eq!(MetricKey::HealthScore.definition().heading(), "Health Score");
    }

    #[test]
    fn orient_flips_lower_is_better() {
        assert_eq!(Direction::HigherIsBetter.orient(3.0), 3.0);
        assert_eq!(Direction::LowerIsBetter.orient(3.0), -3.0);
    }

    #[test]
    fn keys_serialize_as_snapshot_field_names() {
        for key in MetricKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }
}
