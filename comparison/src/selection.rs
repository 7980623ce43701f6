//! The `ids` selection parameter.
//!
//! The dashboard keeps the selected corridors in a comma-separated query
//! parameter (`?ids=USDC-XLM,EURC-PHP`). Order is display order and ids are
//! case-sensitive.

use tracing::debug;

use crate::error::ComparisonError;
use crate::model::{ComparisonSet, CorridorMetricSnapshot};

/// Parse a raw `ids` value into an ordered, de-duplicated id list.
///
/// Whitespace around ids and empty segments are dropped; a repeated id keeps
/// its first position. More than [`ComparisonSet::MAX_CORRIDORS`] ids is an
/// error.
pub fn parse_ids(raw: &str) -> Result<Vec<String>, ComparisonError> {
    let mut ids: Vec<String> = Vec::new();

    for part in raw.split(',') {
        let id = part.trim();
        if id.is_empty() || ids.iter().any(|seen| seen == id) {
            continue;
        }
        ids.push(id.to_string());
    }

    if ids.len() > ComparisonSet::MAX_CORRIDORS {
        return Err(ComparisonError::invalid(format!(
            "at most {} corridors can be selected, got {}",
            ComparisonSet::MAX_CORRIDORS,
            ids.len()
        )));
    }

    Ok(ids)
}

pub fn format_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(|id| id.as_ref())
        .collect::<Vec<&str>>()
        .join(",")
}

/// Build a comparison set in selection order from fetched snapshots.
///
/// Every selected id must have been fetched; snapshots that were fetched but
/// not selected are ignored.
pub fn resolve(
    ids: &[String],
    fetched: &[CorridorMetricSnapshot],
) -> Result<ComparisonSet, ComparisonError> {
    let mut snapshots = Vec::with_capacity(ids.len());

    for id in ids {
        let snapshot = fetched
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| ComparisonError::invalid(format!("corridor {id} was not fetched")))?;
        snapshots.push(snapshot.clone());
    }

    debug!(selected = ids.len(), fetched = fetched.len(), "selection resolved");

    ComparisonSet::new(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(id: &str) -> CorridorMetricSnapshot {
        CorridorMetricSnapshot {
            id: id.into(),
            success_rate_pct: 90.0,
            health_score: 80.0,
            avg_latency_ms: 400.0,
            liquidity_depth_usd: 1.0,
            volume_24h_usd: 1.0,
            avg_slippage_bps: 1.0,
            total_attempts: 0,
            successful_count: 0,
            failed_count: 0,
        }
    }

    #[test]
    fn parses_in_order_and_trims() {
        assert_eq!(
            parse_ids(" USDC-XLM , EURC-PHP,,").unwrap(),
            vec!["USDC-XLM", "EURC-PHP"]
        );
    }

    #[test]
    fn empty_parameter_is_empty_selection() {
        assert!(parse_ids("").unwrap().is_empty());
    }

    #[test]
    fn keeps_case_and_drops_repeats() {
        assert_eq!(
            parse_ids("usdc-xlm,USDC-XLM,usdc-xlm").unwrap(),
            vec!["usdc-xlm", "USDC-XLM"]
        );
    }

    #[test]
    fn more_than_four_is_rejected() {
        assert!(parse_ids("A,B,C,D,E").is_err());
        assert_eq!(parse_ids("A,B,C,D,A").unwrap().len(), 4);
    }

    #[test]
    fn format_round_trips() {
        let ids = parse_ids("B,A,C").unwrap();
        assert_eq!(format_ids(&ids), "B,A,C");
    }

    #[test]
    fn resolve_follows_selection_order() {
        let fetched = vec![snap("A"), snap("B"), snap("C")];
        let set = resolve(&["C".into(), "A".into()], &fetched).unwrap();

        assert_eq!(set.ids(), vec!["C", "A"]);
    }

    #[test]
    fn resolve_fails_on_unfetched_id() {
        let fetched = vec![snap("A")];
        assert!(resolve(&["A".into(), "Z".into()], &fetched).is_err());
    }
}
