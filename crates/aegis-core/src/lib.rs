//! # aegis-core
//!
//! Schema validation engine for Aegis deal memos.
//!
//! A deal memo is a structured investment analysis produced by a model from
//! unstructured pitch material. This crate turns a loosely-typed JSON
//! document into a strongly-typed, immutable memo, or reports every way the
//! document falls short.
//!
//! ## Key Guarantees
//!
//! 1. **Validated by construction**: a constructed entity satisfies every
//!    field constraint and cross-field invariant
//! 2. **Complete reports**: every violated field is reported, each with its
//!    path, rule identifier and message
//! 3. **Deterministic**: the clock is read once per call and can be pinned
//!    through [`ValidationOptions`]
//! 4. **Parallel-safe**: no shared mutable state
//!
//! ## Example
//!
//! ```rust,ignore
//! use aegis_core::{validate_deal_memo, ValidationError};
//!
//! let raw: serde_json::Value = serde_json::from_str(&memo_json)?;
//! match validate_deal_memo(&raw) {
//!     Ok(memo) => println!("signal: {}", memo.aegis_deal_memo().summary().signal_score()),
//!     Err(ValidationError::DealMemo(violations)) => {
//!         for v in &violations {
//!             println!("{}: {} [{}]", v.path, v.message, v.rule);
//!         }
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

pub mod entities;
pub mod normalize;
pub mod schema;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use entities::{
    AegisDealMemo, AnalysisWeightings, BenchmarkComparison, BenchmarkData, CompanyProfile,
    DealMemo, DealMemoMetadata, DealMemoSummary, FundingMetrics, GrowthPotential,
    InvestmentMetrics, InvestmentRecommendation, MetricDistribution, RevenueMetrics,
    RevenueProjection, RiskAssessment, RiskFlag, SocialLinks, TeamMember, TeamMetrics,
    TimeRange, Tracked, TractionMetrics,
};
pub use normalize::{normalize_weightings, NormalizeError};
pub use schema::{
    check_deal_memo_schema, Entity, FieldPath, Invariant, Rule, UnknownFields, ValidationOptions,
    Violation, Violations,
};
pub use types::{
    DocumentType, FundingStage, RecommendationType, RiskCategory, RiskImpact, RiskLikelihood,
    RiskSeverity, RiskType,
};

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the validation façade.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Deal memo validation failed: {0}")]
    DealMemo(Violations),

    #[error("Company profile validation failed: {0}")]
    CompanyProfile(Violations),

    #[error("Investment metrics validation failed: {0}")]
    InvestmentMetrics(Violations),

    #[error("{entity} validation failed: {0}", entity = .0.entity())]
    Entity(Violations),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ValidationError {
    /// The violations behind this error, if the input parsed at all.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::DealMemo(v) | Self::CompanyProfile(v) | Self::InvestmentMetrics(v) | Self::Entity(v) => {
                Some(v)
            }
            Self::Json(_) | Self::Yaml(_) => None,
        }
    }
}

/// Validate a full deal memo.
pub fn validate_deal_memo(raw: &Value) -> Result<DealMemo, ValidationError> {
    validate_deal_memo_with(raw, &ValidationOptions::default())
}

/// Validate a full deal memo with explicit options.
pub fn validate_deal_memo_with(
    raw: &Value,
    options: &ValidationOptions,
) -> Result<DealMemo, ValidationError> {
    validate(raw, options)
}

/// Validate a company profile.
pub fn validate_company_profile(raw: &Value) -> Result<CompanyProfile, ValidationError> {
    validate_company_profile_with(raw, &ValidationOptions::default())
}

/// Validate a company profile with explicit options.
pub fn validate_company_profile_with(
    raw: &Value,
    options: &ValidationOptions,
) -> Result<CompanyProfile, ValidationError> {
    validate(raw, options)
}

/// Validate investment metrics.
pub fn validate_investment_metrics(raw: &Value) -> Result<InvestmentMetrics, ValidationError> {
    validate_investment_metrics_with(raw, &ValidationOptions::default())
}

/// Validate investment metrics with explicit options.
pub fn validate_investment_metrics_with(
    raw: &Value,
    options: &ValidationOptions,
) -> Result<InvestmentMetrics, ValidationError> {
    validate(raw, options)
}

/// Every violation `raw` has as a `T`; empty when it is valid.
///
/// Never fails: this is the diagnostic counterpart of the `validate_*`
/// functions.
pub fn get_validation_errors<T: Entity>(raw: &Value) -> Vec<Violation> {
    get_validation_errors_with::<T>(raw, &ValidationOptions::default())
}

/// [`get_validation_errors`] with explicit options.
pub fn get_validation_errors_with<T: Entity>(raw: &Value, options: &ValidationOptions) -> Vec<Violation> {
    match schema::construct::<T>(raw, options) {
        Ok(_) => Vec::new(),
        Err(violations) => {
            tracing::debug!(entity = T::NAME, violations = violations.len(), "validation errors collected");
            violations.into_vec()
        }
    }
}

fn validate<T: Entity>(raw: &Value, options: &ValidationOptions) -> Result<T, ValidationError> {
    match schema::construct::<T>(raw, options) {
        Ok(entity) => {
            tracing::debug!(entity = T::NAME, violations = 0, "validation passed");
            Ok(entity)
        }
        Err(violations) => {
            tracing::debug!(entity = T::NAME, violations = violations.len(), "validation failed");
            Err(T::failure(violations))
        }
    }
}
