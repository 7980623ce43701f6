//! Corridor metric ranking.
//!
//! Given a [`ComparisonSet`] of 2..=4 corridors and a metric definition
//! table, decide per metric which corridor is best and worst and classify
//! every corridor's value for colour and icon selection.
//!
//! ## Orientation
//! Every value is first mapped onto a "larger is better" scale
//! ([`Direction::orient`]). All comparisons run on oriented values, so a
//! `LowerIsBetter` metric ranks exactly like its negation under
//! `HigherIsBetter`.
//!
//! ## Classification
//! ```text
//! o == o_best               -> Best   (all tied corridors)
//! o == o_worst              -> Worst  (all tied corridors)
//! p = (o - o_worst) / (o_best - o_worst)
//! p >= bands.above_average  -> AboveAverage
//! p <= bands.below_average  -> BelowAverage
//! otherwise                 -> Average
//! ```
//! Best is tested first, so a metric where every corridor holds the same
//! value classifies all of them as `Best`. With two corridors there is no
//! middle band.
//!
//! ## Tie-break
//! `best_id` / `worst_id` name the first corridor in insertion order that
//! holds the extreme value. This is stable across calls.

pub mod types;

use tracing::{debug, instrument, warn};

use crate::error::ComparisonError;
use crate::metrics::MetricDefinition;
use crate::model::ComparisonSet;
use crate::ranking::types::{
    Classification, ClassificationBands, CorridorStanding, MetricRanking, RankingResult,
};

/// Rank `set` on every metric in `metric_defs` using the default bands.
pub fn rank(
    set: &ComparisonSet,
    metric_defs: &[MetricDefinition],
) -> Result<RankingResult, ComparisonError> {
    rank_with_bands(set, metric_defs, &ClassificationBands::default())
}

/// Rank `set` on every metric in `metric_defs`.
///
/// Fails with `InvalidInput` when the set holds fewer than 2 or more than 4
/// corridors, when the table is empty or repeats a metric, or when `bands`
/// are malformed. Fails with `MissingMetric` when a snapshot carries no
/// usable value for a metric.
#[instrument(
    target = "ranking",
    skip(set, metric_defs, bands),
    fields(corridor_count = set.len(), metric_count = metric_defs.len())
)]
pub fn rank_with_bands(
    set: &ComparisonSet,
    metric_defs: &[MetricDefinition],
    bands: &ClassificationBands,
) -> Result<RankingResult, ComparisonError> {
    validate_input(set, metric_defs, bands).inspect_err(|e| {
        warn!(error = %e, "ranking input rejected");
    })?;

    let metrics = metric_defs
        .iter()
        .map(|def| rank_metric(set, def, bands))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(metrics = metrics.len(), "ranking computed");

    Ok(RankingResult { metrics })
}

fn validate_input(
    set: &ComparisonSet,
    metric_defs: &[MetricDefinition],
    bands: &ClassificationBands,
) -> Result<(), ComparisonError> {
    let n = set.len();
    if !(ComparisonSet::MIN_CORRIDORS..=ComparisonSet::MAX_CORRIDORS).contains(&n) {
        return Err(ComparisonError::invalid(format!(
            "ranking needs {} to {} corridors, got {n}",
            ComparisonSet::MIN_CORRIDORS,
            ComparisonSet::MAX_CORRIDORS
        )));
    }

    if metric_defs.is_empty() {
        return Err(ComparisonError::invalid("metric definition table is empty"));
    }

    for (i, def) in metric_defs.iter().enumerate() {
        if metric_defs[..i].iter().any(|d| d.key == def.key) {
            return Err(ComparisonError::invalid(format!(
                "metric {} is defined twice",
                def.key
            )));
        }
    }

    bands.validate()?;

    for snapshot in set {
        snapshot.validate()?;
    }

    Ok(())
}

fn rank_metric(
    set: &ComparisonSet,
    def: &MetricDefinition,
    bands: &ClassificationBands,
) -> Result<MetricRanking, ComparisonError> {
    let mut oriented = Vec::with_capacity(set.len());

    for s in set {
        let v = s.value(def.key);
        if !v.is_finite() {
            return Err(ComparisonError::MissingMetric {
                corridor_id: s.id.clone(),
                metric: def.key,
            });
        }
        oriented.push((v, def.direction.orient(v)));
    }

    // Strict comparisons keep the first occurrence on ties.
    let mut best = 0;
    let mut worst = 0;
    for (i, &(_, o)) in oriented.iter().enumerate().skip(1) {
        if o > oriented[best].1 {
            best = i;
        }
        if o < oriented[worst].1 {
            worst = i;
        }
    }

    let best_o = oriented[best].1;
    let worst_o = oriented[worst].1;
    let spread = best_o - worst_o;

    let per_corridor = set
        .iter()
        .zip(&oriented)
        .map(|(s, &(value, o))| {
            let position = if spread > 0.0 {
                (o - worst_o) / spread
            } else {
                1.0
            };

            let classification = if o == best_o {
                Classification::Best
            } else if o == worst_o {
                Classification::Worst
            } else {
                bands.classify_middle(position)
            };

            CorridorStanding {
                corridor_id: s.id.clone(),
                value,
                position,
                classification,
            }
        })
        .collect();

    let ranking = MetricRanking {
        metric: def.key,
        direction: def.direction,
        best_id: set.snapshots()[best].id.clone(),
        worst_id: set.snapshots()[worst].id.clone(),
        per_corridor,
    };

    debug!(
        metric = %def.key,
        best_id = %ranking.best_id,
        worst_id = %ranking.worst_id,
        spread,
        "metric ranked"
    );

    Ok(ranking)
}
