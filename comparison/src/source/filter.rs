use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::source::types::CorridorRecord;

/// Narrows corridor records before selection.
///
/// Bounds are inclusive. The volume bounds apply to `liquidity_depth_usd`,
/// the figure the corridor list reports as a corridor's volume. A record
/// without the bounded value does not match a set bound.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CorridorFilter {
    pub success_rate_min: Option<f64>,
    pub success_rate_max: Option<f64>,
    pub volume_min: Option<f64>,
    pub volume_max: Option<f64>,

    /// Case-insensitive substring of the source or destination asset.
    pub asset_code: Option<String>,
}

impl CorridorFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, r: &CorridorRecord) -> bool {
        within(r.success_rate, self.success_rate_min, self.success_rate_max)
            && within(r.liquidity_depth_usd, self.volume_min, self.volume_max)
            && self.matches_asset(r)
    }

    fn matches_asset(&self, r: &CorridorRecord) -> bool {
        let Some(code) = &self.asset_code else {
            return true;
        };

        let code = code.to_lowercase();
        r.source_asset.to_lowercase().contains(&code)
            || r.destination_asset.to_lowercase().contains(&code)
    }

    /// Records that match, in their original order.
    pub fn apply<'a>(
        &self,
        records: impl IntoIterator<Item = &'a CorridorRecord>,
    ) -> Vec<&'a CorridorRecord> {
        let mut seen = 0usize;
        let kept: Vec<_> = records
            .into_iter()
            .inspect(|_| seen += 1)
            .filter(|r| self.matches(r))
            .collect();

        debug!(seen, kept = kept.len(), "corridor filter applied");
        kept
    }
}

fn within(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }

    let Some(v) = value else {
        return false;
    };

    min.is_none_or(|m| v >= m) && max.is_none_or(|m| v <= m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, source: &str, dest: &str, rate: f64, depth: f64) -> CorridorRecord {
        CorridorRecord {
            id: id.into(),
            source_asset: source.into(),
            destination_asset: dest.into(),
            success_rate: Some(rate),
            liquidity_depth_usd: Some(depth),
            ..Default::default()
        }
    }

    fn records() -> Vec<CorridorRecord> {
        vec![
            record("USDC-XLM", "USDC", "XLM", 94.5, 6_200_000.0),
            record("EURC-PHP", "EURC", "PHP", 88.3, 1_500_000.0),
            record("BRLT-USDC", "BRLT", "USDC", 72.0, 300_000.0),
        ]
    }

    fn ids(kept: Vec<&CorridorRecord>) -> Vec<&str> {
        kept.into_iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let f = CorridorFilter::default();
        let all = records();

        assert!(f.is_empty());
        assert_eq!(f.apply(&all).len(), 3);
    }

    #[test]
    fn success_rate_bounds_are_inclusive() {
        let all = records();
        let f = CorridorFilter {
            success_rate_min: Some(88.3),
            success_rate_max: Some(94.5),
            ..Default::default()
        };

        assert_eq!(ids(f.apply(&all)), vec!["USDC-XLM", "EURC-PHP"]);
    }

    #[test]
    fn volume_bounds_apply_to_liquidity_depth() {
        let all = records();
        let f = CorridorFilter {
            volume_min: Some(300_000.0),
            volume_max: Some(2_000_000.0),
            ..Default::default()
        };

        assert_eq!(ids(f.apply(&all)), vec!["EURC-PHP", "BRLT-USDC"]);
    }

    #[test]
    fn asset_code_matches_either_side_case_insensitively() {
        let all = records();
        let f = CorridorFilter {
            asset_code: Some("usdc".into()),
            ..Default::default()
        };

        assert_eq!(ids(f.apply(&all)), vec!["USDC-XLM", "BRLT-USDC"]);
    }

    #[test]
    fn bounds_combine() {
        let all = records();
        let f = CorridorFilter {
            success_rate_min: Some(80.0),
            asset_code: Some("US".into()),
            ..Default::default()
        };

        assert_eq!(ids(f.apply(&all)), vec!["USDC-XLM"]);
    }

    #[test]
    fn record_without_bounded_value_is_excluded() {
        let mut r = record("X-Y", "X", "Y", 90.0, 1.0);
        r.success_rate = None;

        let bounded = CorridorFilter {
            success_rate_min: Some(0.0),
            ..Default::default()
        };
        assert!(!bounded.matches(&r));
        assert!(CorridorFilter::default().matches(&r));
    }

    #[test]
    fn deserializes_from_query_style_json() {
        let f: CorridorFilter =
            serde_json::from_str(r#"{ "success_rate_min": 90.0, "asset_code": "XLM" }"#).unwrap();

        assert_eq!(f.success_rate_min, Some(90.0));
        assert_eq!(f.asset_code.as_deref(), Some("XLM"));
        assert_eq!(f.volume_max, None);
    }
}
