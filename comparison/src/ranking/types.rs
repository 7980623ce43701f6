use serde::Serialize;

use crate::error::ComparisonError;
use crate::metrics::{Direction, MetricKey};

/// Per-corridor, per-metric standing inside a comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    Best,
    AboveAverage,
    Average,
    BelowAverage,
    Worst,
}

/// Colour family the table and cards use for a classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    Positive,
    Neutral,
    Negative,
}

impl Classification {
    pub fn tone(self) -> Tone {
        match self {
            Classification::Best | Classification::AboveAverage => Tone::Positive,
            Classification::Average => Tone::Neutral,
            Classification::BelowAverage | Classification::Worst => Tone::Negative,
        }
    }

    /// Icon name for the indicator next to a value.
    pub fn icon(self) -> &'static str {
        match self {
            Classification::Best => "trophy",
            Classification::AboveAverage => "trending-up",
            Classification::Average => "minus",
            Classification::BelowAverage => "trending-down",
            Classification::Worst => "alert-triangle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Classification::Best => "best",
            Classification::AboveAverage => "above average",
            Classification::Average => "average",
            Classification::BelowAverage => "below average",
            Classification::Worst => "worst",
        }
    }
}

/// Percentile thresholds for the middle band.
///
/// Positions are oriented so 1.0 is the best value in the set and 0.0 the
/// worst. These are UX tuning knobs, not statistics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClassificationBands {
    /// Non-extreme corridors at or above this position are `AboveAverage`.
    pub above_average: f64,

    /// Non-extreme corridors at or below this position are `BelowAverage`.
    pub below_average: f64,
}

impl ClassificationBands {
    pub const DEFAULT_ABOVE_AVERAGE: f64 = 0.8;
    pub const DEFAULT_BELOW_AVERAGE: f64 = 0.3;

    pub fn new(above_average: f64, below_average: f64) -> Result<Self, ComparisonError> {
        let bands = Self {
            above_average,
            below_average,
        };
        bands.validate()?;
        Ok(bands)
    }

    /// Requires `0 <= below_average < above_average <= 1`.
    pub fn validate(&self) -> Result<(), ComparisonError> {
        let ok = self.below_average.is_finite()
            && self.above_average.is_finite()
            && 0.0 <= self.below_average
            && self.below_average < self.above_average
            && self.above_average <= 1.0;

        if ok {
            Ok(())
        } else {
            Err(ComparisonError::invalid(format!(
                "classification bands must satisfy 0 <= below ({}) < above ({}) <= 1",
                self.below_average, self.above_average
            )))
        }
    }

    pub(crate) fn classify_middle(&self, position: f64) -> Classification {
        if position >= self.above_average {
            Classification::AboveAverage
        } else if position <= self.below_average {
            Classification::BelowAverage
        } else {
            Classification::Average
        }
    }
}

impl Default for ClassificationBands {
    fn default() -> Self {
        Self {
            above_average: Self::DEFAULT_ABOVE_AVERAGE,
            below_average: Self::DEFAULT_BELOW_AVERAGE,
        }
    }
}

/// One corridor's entry in a metric ranking.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorridorStanding {
    pub corridor_id: String,

    /// Raw metric value as supplied
    pub value: f64,

    /// Oriented position in [0, 1]; 1.0 = best value in the set
    pub position: f64,

    pub classification: Classification,
}

/// Ranking of every corridor for a single metric.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRanking {
    pub metric: MetricKey,
    pub direction: Direction,

    /// First corridor, in insertion order, holding the best value.
    pub best_id: String,

    /// First corridor, in insertion order, holding the worst value.
    pub worst_id: String,

    /// Standings in the set's insertion order.
    pub per_corridor: Vec<CorridorStanding>,
}

impl MetricRanking {
    pub fn classification(&self, corridor_id: &str) -> Option<Classification> {
        self.standing(corridor_id).map(|s| s.classification)
    }

    pub fn standing(&self, corridor_id: &str) -> Option<&CorridorStanding> {
        self.per_corridor
            .iter()
            .find(|s| s.corridor_id == corridor_id)
    }

    pub fn count(&self, classification: Classification) -> usize {
        self.per_corridor
            .iter()
            .filter(|s| s.classification == classification)
            .count()
    }
}

/// Rankings for every metric in the definition table, in table order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankingResult {
    pub metrics: Vec<MetricRanking>,
}

impl RankingResult {
    pub fn get(&self, metric: MetricKey) -> Option<&MetricRanking> {
        self.metrics.iter().find(|m| m.metric == metric)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricRanking> {
        self.metrics.iter()
    }

    /// How many metrics each corridor wins, in the order of the first metric's standings.
    pub fn wins(&self) -> Vec<(String, usize)> {
        let Some(first) = self.metrics.first() else {
            return vec![];
        };

        first
            .per_corridor
            .iter()
            .map(|s| {
                let won = self
                    .metrics
                    .iter()
                    .filter(|m| m.classification(&s.corridor_id) == Some(Classification::Best))
                    .count();
                (s.corridor_id.clone(), won)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bands_are_80_and_30() {
        let b = ClassificationBands::default();
        assert_eq!(b.above_average, 0.8);
        assert_eq!(b.below_average, 0.3);
        assert!(b.validate().is_ok());
    }

    #[test]
    fn inverted_bands_are_rejected() {
        assert!(ClassificationBands::new(0.3, 0.8).is_err());
        assert!(ClassificationBands::new(1.2, 0.3).is_err());
        assert!(ClassificationBands::new(0.8, -0.1).is_err());
        assert!(ClassificationBands::new(f64::NAN, 0.3).is_err());
    }

    #[test]
    fn middle_band_thresholds_are_inclusive() {
        let b = ClassificationBands::default();

        assert_eq!(b.classify_middle(0.8), Classification::AboveAverage);
        assert_eq!(b.classify_middle(0.79), Classification::Average);
        assert_eq!(b.classify_middle(0.31), Classification::Average);
        assert_eq!(b.classify_middle(0.3), Classification::BelowAverage);
    }

    #[test]
    fn tones_follow_classification() {
        assert_eq!(Classification::Best.tone(), Tone::Positive);
        assert_eq!(Classification::AboveAverage.tone(), Tone::Positive);
        assert_eq!(Classification::Average.tone(), Tone::Neutral);
        assert_eq!(Classification::BelowAverage.tone(), Tone::Negative);
        assert_eq!(Classification::Worst.tone(), Tone::Negative);
    }
}
