use std::path::PathBuf;

use crate::error::ComparisonError;
use crate::ranking::types::ClassificationBands;

#[derive(Clone, Debug)]
pub struct AppConfig {
    // =========================
    // Ranking configuration
    // =========================
    /// Middle-band thresholds for classification.
    ///
    /// Positions are oriented so 1.0 is the best value in the comparison.
    /// A non-extreme corridor at or above `above_average` is highlighted as
    /// above average; at or below `below_average` as below average.
    ///
    /// These are presentation tuning, so they are overridable without a
    /// rebuild.
    pub bands: ClassificationBands,

    // =========================
    // Export configuration
    // =========================
    /// Directory CSV exports are written into.
    pub export_dir: PathBuf,

    // =========================
    // Logging
    // =========================
    /// Emit JSON logs instead of human-readable ones.
    pub json_logs: bool,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults.
    ///
    /// Fails with `InvalidInput` when a band override does not parse or the
    /// resulting bands are inconsistent.
    pub fn from_env() -> Result<Self, ComparisonError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        get: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ComparisonError> {
        let above = parse_fraction(
            &get,
            "CORRIDOR_ABOVE_AVERAGE_PCT",
            ClassificationBands::DEFAULT_ABOVE_AVERAGE,
        )?;
        let below = parse_fraction(
            &get,
            "CORRIDOR_BELOW_AVERAGE_PCT",
            ClassificationBands::DEFAULT_BELOW_AVERAGE,
        )?;

        let export_dir = get("CORRIDOR_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let json_logs = get("APP_ENV").unwrap_or_default() == "production";

        Ok(Self {
            bands: ClassificationBands::new(above, below)?,
            export_dir,
            json_logs,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bands: ClassificationBands::default(),
            export_dir: PathBuf::from("."),
            json_logs: false,
        }
    }
}

fn parse_fraction(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f64,
) -> Result<f64, ComparisonError> {
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|e| ComparisonError::invalid(format!("{key}={raw:?}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(cfg.bands, ClassificationBands::default());
        assert_eq!(cfg.export_dir, PathBuf::from("."));
        assert!(!cfg.json_logs);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("CORRIDOR_ABOVE_AVERAGE_PCT", "0.75"),
            ("CORRIDOR_BELOW_AVERAGE_PCT", " 0.25 "),
            ("CORRIDOR_EXPORT_DIR", "/tmp/exports"),
            ("APP_ENV", "production"),
        ]))
        .unwrap();

        assert_eq!(cfg.bands.above_average, 0.75);
        assert_eq!(cfg.bands.below_average, 0.25);
        assert_eq!(cfg.export_dir, PathBuf::from("/tmp/exports"));
        assert!(cfg.json_logs);
    }

    #[test]
    fn unparsable_band_is_rejected() {
        let res = AppConfig::from_lookup(lookup(&[("CORRIDOR_ABOVE_AVERAGE_PCT", "high")]));
        assert!(matches!(res, Err(ComparisonError::InvalidInput(_))));
    }

    #[test]
    fn inconsistent_bands_are_rejected() {
        let res = AppConfig::from_lookup(lookup(&[("CORRIDOR_BELOW_AVERAGE_PCT", "0.9")]));
        assert!(res.is_err());
    }
}
