//! Rescaling of scoring weightings.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::entities::WEIGHTINGS_TOTAL;

/// Errors from weighting normalization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("All weightings cannot be zero")]
    ZeroTotal,
}

/// Rescale every weight proportionally so the set sums to 100.
///
/// Negative weights are scaled like any other; only a zero total is an
/// error. An empty map has a zero total.
pub fn normalize_weightings(
    weightings: &BTreeMap<String, f64>,
) -> Result<BTreeMap<String, f64>, NormalizeError> {
    let total: f64 = weightings.values().sum();
    if total == 0.0 {
        return Err(NormalizeError::ZeroTotal);
    }

    Ok(weightings
        .iter()
        .map(|(name, weight)| (name.clone(), weight / total * WEIGHTINGS_TOTAL))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AnalysisWeightings;
    use proptest::prelude::*;

    fn weights(values: &[(&str, f64)]) -> BTreeMap<String, f64> {
        values.iter().map(|(name, weight)| (name.to_string(), *weight)).collect()
    }

    #[test]
    fn test_normalize_weightings_valid() {
        let normalized = normalize_weightings(&weights(&[
            ("market_opportunity", 30.0),
            ("team", 30.0),
            ("traction", 20.0),
            ("product", 10.0),
            ("competitive_position", 10.0),
        ]))
        .unwrap();
        let total: f64 = normalized.values().sum();
        assert!((total - 100.0).abs() < 0.01);
        assert!((normalized["team"] - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_weightings_rescales() {
        let normalized = normalize_weightings(&weights(&[
            ("market_opportunity", 60.0),
            ("team", 60.0),
            ("traction", 40.0),
            ("product", 20.0),
            ("competitive_position", 20.0),
        ]))
        .unwrap();
        assert!((normalized["team"] - 30.0).abs() < 1e-9);
        assert!((normalized["traction"] - 20.0).abs() < 1e-9);
        assert!((normalized["product"] - 10.0).abs() < 1e-9);

        let shrunk = normalize_weightings(&weights(&[("team", 1.0), ("product", 3.0)])).unwrap();
        assert!((shrunk["team"] - 25.0).abs() < 1e-9);
        assert!((shrunk["product"] - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_weightings_all_zero() {
        let err = normalize_weightings(&weights(&[("team", 0.0), ("product", 0.0)])).unwrap_err();
        assert_eq!(err, NormalizeError::ZeroTotal);
        assert_eq!(err.to_string(), "All weightings cannot be zero");
        assert!(normalize_weightings(&BTreeMap::new()).is_err());
    }

    #[test]
    fn test_negative_weights_are_scaled() {
        let normalized = normalize_weightings(&weights(&[("team", -10.0), ("product", 60.0)])).unwrap();
        assert!((normalized["team"] + 20.0).abs() < 1e-9);
        assert!((normalized["product"] - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalized_map_builds_weightings() {
        let raw = AnalysisWeightings::default().as_map();
        let doubled: BTreeMap<String, f64> = raw.iter().map(|(k, v)| (k.clone(), v * 2.0)).collect();
        let normalized = normalize_weightings(&doubled).unwrap();
        let rebuilt = AnalysisWeightings::new(
            normalized["market_opportunity"],
            normalized["team"],
            normalized["traction"],
            normalized["product"],
            normalized["competitive_position"],
        )
        .unwrap();
        assert!((rebuilt.traction() - 20.0).abs() < 1e-9);
        assert!((rebuilt.total() - 100.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_normalized_weights_sum_to_100(
            values in prop::collection::vec(0.001f64..1_000.0, 1..8),
        ) {
            let input: BTreeMap<String, f64> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("w{}", i), *v))
                .collect();
            let normalized = normalize_weightings(&input).unwrap();
            prop_assert_eq!(normalized.len(), input.len());
            let total: f64 = normalized.values().sum();
            prop_assert!((total - 100.0).abs() < 0.01);
        }
    }
}
