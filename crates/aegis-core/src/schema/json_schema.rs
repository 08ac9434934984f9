//! JSON Schema for deal memo documents.
//!
//! Producers embed spec/deal_memo.schema.json in their generation prompt;
//! this module exposes the same document compiled, as a structural
//! pre-check. Cross-field rules are not expressible there, so the typed
//! validators stay authoritative.

use std::sync::OnceLock;
use thiserror::Error;

/// Embedded deal memo schema (loaded at compile time).
pub const DEAL_MEMO_SCHEMA_JSON: &str = include_str!("../../../../spec/deal_memo.schema.json");

/// Compiled JSON Schema validator (initialized once, reused).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

/// Errors from schema loading.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),
}

/// The compiled deal memo schema.
pub fn deal_memo_schema() -> Result<&'static jsonschema::Validator, SchemaError> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = match serde_json::from_str(DEAL_MEMO_SCHEMA_JSON) {
            Ok(v) => v,
            Err(e) => return Err(format!("Invalid schema JSON: {}", e)),
        };

        match jsonschema::options().build(&schema_value) {
            Ok(v) => Ok(v),
            Err(e) => Err(format!("Failed to compile schema: {}", e)),
        }
    });

    match result {
        Ok(v) => Ok(v),
        Err(e) => Err(SchemaError::LoadError(e.clone())),
    }
}

/// Check a raw deal memo against the schema.
///
/// Returns every schema error with the instance path it occurred at.
pub fn check_deal_memo_schema(memo: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = deal_memo_schema().map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(memo)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(errors = errors.len(), "deal memo failed schema pre-check");
        Err(errors)
    }
}

/// Whether a raw deal memo passes the schema.
pub fn is_valid_deal_memo(memo: &serde_json::Value) -> bool {
    deal_memo_schema()
        .map(|v| v.is_valid(memo))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::deal_memo;
    use serde_json::json;

    #[test]
    fn test_schema_compiles() {
        assert!(deal_memo_schema().is_ok());
    }

    #[test]
    fn test_valid_memo_passes_schema() {
        assert_eq!(check_deal_memo_schema(&deal_memo()), Ok(()));
        assert!(is_valid_deal_memo(&deal_memo()));
    }

    #[test]
    fn test_missing_section_fails() {
        let mut memo = deal_memo();
        memo["aegis_deal_memo"].as_object_mut().unwrap().remove("summary");
        let errors = check_deal_memo_schema(&memo).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("summary"));
    }

    #[test]
    fn test_errors_carry_instance_path() {
        let mut memo = deal_memo();
        memo["aegis_deal_memo"]["summary"]["signal_score"] = json!(150.0);
        memo["aegis_deal_memo"]["summary"]["stage"] = json!("series-z");
        let errors = check_deal_memo_schema(&memo).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.ends_with("/aegis_deal_memo/summary/signal_score")));
        assert!(errors.iter().any(|e| e.ends_with("/aegis_deal_memo/summary/stage")));
    }

    #[test]
    fn test_cross_field_rules_are_not_checked() {
        let mut memo = deal_memo();
        memo["aegis_deal_memo"]["growth_potential"]["revenue_projection"]["year3"] = json!(1_000_000.0);
        memo["aegis_deal_memo"]["analysis_weightings"]["team"] = json!(75.0);
        assert!(is_valid_deal_memo(&memo));
    }

    #[test]
    fn test_non_object_fails() {
        assert!(!is_valid_deal_memo(&json!("memo")));
    }
}
