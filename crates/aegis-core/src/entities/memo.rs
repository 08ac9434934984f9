//! The deal memo aggregate and its sections.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use super::{BenchmarkComparison, RiskAssessment, Tracked};
use crate::schema::{
    Bounds, Checked, Entity, FieldPath, Invariant, ItemLength, Length, Reader, Rule, Violation, Violations,
};
use crate::types::{FundingStage, RecommendationType};
use crate::ValidationError;

/// Required total of the five weightings, in percent.
pub const WEIGHTINGS_TOTAL: f64 = 100.0;

/// Absolute tolerance on the weightings total.
pub const WEIGHTINGS_TOLERANCE: f64 = 0.01;

/// Percentage weight of each scoring dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisWeightings {
    market_opportunity: f64,
    team: f64,
    traction: f64,
    product: f64,
    competitive_position: f64,
}

impl Entity for AnalysisWeightings {
    const NAME: &'static str = "AnalysisWeightings";
    const FIELDS: &'static [&'static str] = &[
        "market_opportunity",
        "team",
        "traction",
        "product",
        "competitive_position",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let percent = Bounds::between(0.0, 100.0);
        let market_opportunity = r.number_or("market_opportunity", 25.0, percent);
        let team = r.number_or("team", 25.0, percent);
        let traction = r.number_or("traction", 20.0, percent);
        let product = r.number_or("product", 15.0, percent);
        let competitive_position = r.number_or("competitive_position", 15.0, percent);

        let weightings = Self {
            market_opportunity: market_opportunity?,
            team: team?,
            traction: traction?,
            product: product?,
            competitive_position: competitive_position?,
        };
        let total = weightings.total();
        if (total - WEIGHTINGS_TOTAL).abs() > WEIGHTINGS_TOLERANCE {
            return Err(r.reject_here(
                Rule::Invariant(Invariant::WeightingsSum),
                format!("Weightings must sum to 100%, got {}%", total),
            ));
        }
        Ok(weightings)
    }
}

/// JSON has no NaN or infinity; `json!` would turn them into null, which
/// reads as an absent field.
fn finite_arguments(entity: &'static str, fields: &[(&str, f64)]) -> Result<(), Violations> {
    let items: Vec<Violation> = fields
        .iter()
        .filter(|(_, value)| !value.is_finite())
        .map(|(name, _)| Violation::new(FieldPath::root().key(*name), Rule::InvalidType, "must be a finite number"))
        .collect();
    if items.is_empty() {
        Ok(())
    } else {
        Err(Violations::new(entity, items))
    }
}

impl Default for AnalysisWeightings {
    fn default() -> Self {
        Self {
            market_opportunity: 25.0,
            team: 25.0,
            traction: 20.0,
            product: 15.0,
            competitive_position: 15.0,
        }
    }
}

impl AnalysisWeightings {
    /// Build weightings, validating them like raw input.
    pub fn new(
        market_opportunity: f64,
        team: f64,
        traction: f64,
        product: f64,
        competitive_position: f64,
    ) -> Result<Self, Violations> {
        finite_arguments(
            Self::NAME,
            &[
                ("market_opportunity", market_opportunity),
                ("team", team),
                ("traction", traction),
                ("product", product),
                ("competitive_position", competitive_position),
            ],
        )?;
        Self::from_value(&json!({
            "market_opportunity": market_opportunity,
            "team": team,
            "traction": traction,
            "product": product,
            "competitive_position": competitive_position,
        }))
    }

    pub fn market_opportunity(&self) -> f64 {
        self.market_opportunity
    }

    pub fn team(&self) -> f64 {
        self.team
    }

    pub fn traction(&self) -> f64 {
        self.traction
    }

    pub fn product(&self) -> f64 {
        self.product
    }

    pub fn competitive_position(&self) -> f64 {
        self.competitive_position
    }

    /// Sum of the five weights.
    pub fn total(&self) -> f64 {
        self.market_opportunity + self.team + self.traction + self.product + self.competitive_position
    }

    /// Weights keyed by dimension name.
    pub fn as_map(&self) -> BTreeMap<String, f64> {
        [
            ("market_opportunity", self.market_opportunity),
            ("team", self.team),
            ("traction", self.traction),
            ("product", self.product),
            ("competitive_position", self.competitive_position),
        ]
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect()
    }
}

/// Top-line memo header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealMemoSummary {
    company_name: String,
    one_liner: String,
    sector: String,
    stage: FundingStage,
    signal_score: f64,
    recommendation: RecommendationType,
    confidence_level: f64,
    last_updated: DateTime<Utc>,
}

impl Entity for DealMemoSummary {
    const NAME: &'static str = "DealMemoSummary";
    const FIELDS: &'static [&'static str] = &[
        "company_name",
        "one_liner",
        "sector",
        "stage",
        "signal_score",
        "recommendation",
        "confidence_level",
        "last_updated",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let company_name = r.string("company_name", Length::between(1, 200));
        let one_liner = r.string("one_liner", Length::between(10, 500));
        let sector = r.string("sector", Length::between(1, 100));
        let stage = r.choice("stage");
        let signal_score = r.number("signal_score", Bounds::between(0.0, 100.0));
        let recommendation = r.choice("recommendation");
        let confidence_level = r.number("confidence_level", Bounds::between(0.0, 1.0));
        let last_updated = r.datetime("last_updated");

        Ok(Self {
            company_name: company_name?,
            one_liner: one_liner?,
            sector: sector?,
            stage: stage?,
            signal_score: signal_score?,
            recommendation: recommendation?,
            confidence_level: confidence_level?,
            last_updated: last_updated?,
        })
    }
}

impl DealMemoSummary {
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn one_liner(&self) -> &str {
        &self.one_liner
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn stage(&self) -> FundingStage {
        self.stage
    }

    pub fn signal_score(&self) -> f64 {
        self.signal_score
    }

    pub fn recommendation(&self) -> RecommendationType {
        self.recommendation
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}

/// One, three and five year revenue forecast.
///
/// Each year must not fall below the previous one; year5 is compared
/// against year3 only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenueProjection {
    year1: f64,
    year3: f64,
    year5: f64,
}

impl Entity for RevenueProjection {
    const NAME: &'static str = "RevenueProjection";
    const FIELDS: &'static [&'static str] = &["year1", "year3", "year5"];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let year1 = r.number("year1", Bounds::at_least(0.0));
        let year3 = r.number("year3", Bounds::at_least(0.0));
        let year5 = r.number("year5", Bounds::at_least(0.0));

        let projection = Self {
            year1: year1?,
            year3: year3?,
            year5: year5?,
        };
        if projection.year3 < projection.year1 {
            return Err(r.reject(
                "year3",
                Rule::Invariant(Invariant::Year3AtLeastYear1),
                "year3 projection should not be less than year1",
            ));
        }
        if projection.year5 < projection.year3 {
            return Err(r.reject(
                "year5",
                Rule::Invariant(Invariant::Year5AtLeastYear3),
                "year5 projection should not be less than year3",
            ));
        }
        Ok(projection)
    }
}

impl RevenueProjection {
    /// Build a projection, validating it like raw input.
    pub fn new(year1: f64, year3: f64, year5: f64) -> Result<Self, Violations> {
        finite_arguments(Self::NAME, &[("year1", year1), ("year3", year3), ("year5", year5)])?;
        Self::from_value(&json!({
            "year1": year1,
            "year3": year3,
            "year5": year5,
        }))
    }

    pub fn year1(&self) -> f64 {
        self.year1
    }

    pub fn year3(&self) -> f64 {
        self.year3
    }

    pub fn year5(&self) -> f64 {
        self.year5
    }
}

/// Upside narrative and revenue outlook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthPotential {
    upside_summary: String,
    growth_timeline: String,
    key_drivers: Vec<String>,
    scalability_factors: Vec<String>,
    market_expansion_opportunity: String,
    revenue_projection: RevenueProjection,
}

impl Entity for GrowthPotential {
    const NAME: &'static str = "GrowthPotential";
    const FIELDS: &'static [&'static str] = &[
        "upside_summary",
        "growth_timeline",
        "key_drivers",
        "scalability_factors",
        "market_expansion_opportunity",
        "revenue_projection",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let upside_summary = r.string("upside_summary", Length::between(50, 2000));
        let growth_timeline = r.string("growth_timeline", Length::between(20, 1000));
        let key_drivers = r.bounded_strings(
            "key_drivers",
            ItemLength::new(5, 200, "Each key driver must be between 5 and 200 characters"),
        );
        let scalability_factors = r.bounded_strings(
            "scalability_factors",
            ItemLength::new(5, 200, "Each scalability factor must be between 5 and 200 characters"),
        );
        let market_expansion_opportunity =
            r.string("market_expansion_opportunity", Length::between(20, 1000));
        let revenue_projection = r.entity("revenue_projection");

        Ok(Self {
            upside_summary: upside_summary?,
            growth_timeline: growth_timeline?,
            key_drivers: key_drivers?,
            scalability_factors: scalability_factors?,
            market_expansion_opportunity: market_expansion_opportunity?,
            revenue_projection: revenue_projection?,
        })
    }
}

impl GrowthPotential {
    pub fn upside_summary(&self) -> &str {
        &self.upside_summary
    }

    pub fn growth_timeline(&self) -> &str {
        &self.growth_timeline
    }

    pub fn key_drivers(&self) -> &[String] {
        &self.key_drivers
    }

    pub fn scalability_factors(&self) -> &[String] {
        &self.scalability_factors
    }

    pub fn market_expansion_opportunity(&self) -> &str {
        &self.market_expansion_opportunity
    }

    pub fn revenue_projection(&self) -> &RevenueProjection {
        &self.revenue_projection
    }
}

/// Final investment guidance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentRecommendation {
    narrative: String,
    investment_thesis: String,
    ideal_check_size: String,
    ideal_valuation_cap: String,
    suggested_terms: Vec<String>,
    key_diligence_questions: Vec<String>,
    follow_up_actions: Vec<String>,
    timeline_to_decision: String,
}

impl Entity for InvestmentRecommendation {
    const NAME: &'static str = "InvestmentRecommendation";
    const FIELDS: &'static [&'static str] = &[
        "narrative",
        "investment_thesis",
        "ideal_check_size",
        "ideal_valuation_cap",
        "suggested_terms",
        "key_diligence_questions",
        "follow_up_actions",
        "timeline_to_decision",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let narrative = r.string("narrative", Length::between(100, 3000));
        let investment_thesis = r.string("investment_thesis", Length::between(50, 2000));
        let ideal_check_size = r.string("ideal_check_size", Length::between(5, 100));
        let ideal_valuation_cap = r.string("ideal_valuation_cap", Length::between(5, 100));
        let suggested_terms = r.bounded_strings(
            "suggested_terms",
            ItemLength::new(5, 200, "Each suggested term must be between 5 and 200 characters"),
        );
        let key_diligence_questions = r.bounded_strings(
            "key_diligence_questions",
            ItemLength::new(10, 300, "Each diligence question must be between 10 and 300 characters"),
        );
        let follow_up_actions = r.bounded_strings(
            "follow_up_actions",
            ItemLength::new(5, 200, "Each follow-up action must be between 5 and 200 characters"),
        );
        let timeline_to_decision = r.string("timeline_to_decision", Length::between(5, 100));

        Ok(Self {
            narrative: narrative?,
            investment_thesis: investment_thesis?,
            ideal_check_size: ideal_check_size?,
            ideal_valuation_cap: ideal_valuation_cap?,
            suggested_terms: suggested_terms?,
            key_diligence_questions: key_diligence_questions?,
            follow_up_actions: follow_up_actions?,
            timeline_to_decision: timeline_to_decision?,
        })
    }
}

impl InvestmentRecommendation {
    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    pub fn investment_thesis(&self) -> &str {
        &self.investment_thesis
    }

    pub fn ideal_check_size(&self) -> &str {
        &self.ideal_check_size
    }

    pub fn ideal_valuation_cap(&self) -> &str {
        &self.ideal_valuation_cap
    }

    pub fn suggested_terms(&self) -> &[String] {
        &self.suggested_terms
    }

    pub fn key_diligence_questions(&self) -> &[String] {
        &self.key_diligence_questions
    }

    pub fn follow_up_actions(&self) -> &[String] {
        &self.follow_up_actions
    }

    pub fn timeline_to_decision(&self) -> &str {
        &self.timeline_to_decision
    }
}

/// Provenance of a generated memo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealMemoMetadata {
    generated_by: String,
    analysis_version: String,
    source_documents: Vec<String>,
    processing_time: f64,
    data_quality: f64,
}

impl Entity for DealMemoMetadata {
    const NAME: &'static str = "DealMemoMetadata";
    const FIELDS: &'static [&'static str] = &[
        "generated_by",
        "analysis_version",
        "source_documents",
        "processing_time",
        "data_quality",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let generated_by = r.string("generated_by", Length::between(1, 100));
        let analysis_version = r.string("analysis_version", Length::between(1, 20));
        let source_documents = r.strings("source_documents");
        let processing_time = r.number("processing_time", Bounds::at_least(0.0));
        let data_quality = r.number("data_quality", Bounds::between(0.0, 1.0));

        Ok(Self {
            generated_by: generated_by?,
            analysis_version: analysis_version?,
            source_documents: source_documents?,
            processing_time: processing_time?,
            data_quality: data_quality?,
        })
    }
}

impl DealMemoMetadata {
    pub fn generated_by(&self) -> &str {
        &self.generated_by
    }

    pub fn analysis_version(&self) -> &str {
        &self.analysis_version
    }

    pub fn source_documents(&self) -> &[String] {
        &self.source_documents
    }

    /// Generation time in seconds.
    pub fn processing_time(&self) -> f64 {
        self.processing_time
    }

    pub fn data_quality(&self) -> f64 {
        self.data_quality
    }
}

/// Full memo body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AegisDealMemo {
    summary: DealMemoSummary,
    key_benchmarks: Vec<BenchmarkComparison>,
    growth_potential: GrowthPotential,
    risk_assessment: RiskAssessment,
    investment_recommendation: InvestmentRecommendation,
    analysis_weightings: AnalysisWeightings,
    metadata: DealMemoMetadata,
}

impl Entity for AegisDealMemo {
    const NAME: &'static str = "AegisDealMemo";
    const FIELDS: &'static [&'static str] = &[
        "summary",
        "key_benchmarks",
        "growth_potential",
        "risk_assessment",
        "investment_recommendation",
        "analysis_weightings",
        "metadata",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let summary = r.entity("summary");
        let key_benchmarks = r.entities("key_benchmarks");
        let growth_potential = r.entity("growth_potential");
        let risk_assessment = r.entity("risk_assessment");
        let investment_recommendation = r.entity("investment_recommendation");
        let analysis_weightings = r.entity("analysis_weightings");
        let metadata = r.entity("metadata");

        Ok(Self {
            summary: summary?,
            key_benchmarks: key_benchmarks?,
            growth_potential: growth_potential?,
            risk_assessment: risk_assessment?,
            investment_recommendation: investment_recommendation?,
            analysis_weightings: analysis_weightings?,
            metadata: metadata?,
        })
    }
}

impl AegisDealMemo {
    pub fn summary(&self) -> &DealMemoSummary {
        &self.summary
    }

    pub fn key_benchmarks(&self) -> &[BenchmarkComparison] {
        &self.key_benchmarks
    }

    pub fn growth_potential(&self) -> &GrowthPotential {
        &self.growth_potential
    }

    pub fn risk_assessment(&self) -> &RiskAssessment {
        &self.risk_assessment
    }

    pub fn investment_recommendation(&self) -> &InvestmentRecommendation {
        &self.investment_recommendation
    }

    pub fn analysis_weightings(&self) -> &AnalysisWeightings {
        &self.analysis_weightings
    }

    pub fn metadata(&self) -> &DealMemoMetadata {
        &self.metadata
    }
}

/// An identified, persisted deal memo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealMemo {
    #[serde(flatten)]
    tracked: Tracked,
    aegis_deal_memo: AegisDealMemo,
}

impl Entity for DealMemo {
    const NAME: &'static str = "DealMemo";
    const FIELDS: &'static [&'static str] = &["id", "created_at", "updated_at", "aegis_deal_memo"];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let tracked = Tracked::read(r);
        let aegis_deal_memo = r.entity("aegis_deal_memo");

        Ok(Self {
            tracked: tracked?,
            aegis_deal_memo: aegis_deal_memo?,
        })
    }

    fn failure(violations: Violations) -> ValidationError {
        ValidationError::DealMemo(violations)
    }
}

impl DealMemo {
    pub fn tracked(&self) -> &Tracked {
        &self.tracked
    }

    pub fn aegis_deal_memo(&self) -> &AegisDealMemo {
        &self.aegis_deal_memo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::deal_memo;
    use proptest::prelude::*;

    fn memo_body() -> serde_json::Value {
        deal_memo()["aegis_deal_memo"].clone()
    }

    #[test]
    fn test_valid_weightings_sum_to_100() {
        let weightings = AnalysisWeightings::new(25.0, 25.0, 20.0, 15.0, 15.0).unwrap();
        assert_eq!(weightings.market_opportunity(), 25.0);
        assert_eq!(weightings, AnalysisWeightings::default());
    }

    #[test]
    fn test_invalid_weightings_sum_not_100() {
        let violations = AnalysisWeightings::new(30.0, 30.0, 30.0, 30.0, 30.0).unwrap_err();
        let violation = violations.iter().next().unwrap();
        assert_eq!(violation.rule, Rule::Invariant(Invariant::WeightingsSum));
        assert!(violation.path.is_root());
        assert_eq!(violation.message, "Weightings must sum to 100%, got 150%");
    }

    #[test]
    fn test_weightings_with_floating_point_precision() {
        let weightings = AnalysisWeightings::new(25.001, 24.999, 20.0, 15.0, 15.0).unwrap();
        assert_eq!(weightings.market_opportunity(), 25.001);
    }

    #[test]
    fn test_absent_weightings_take_defaults() {
        let weightings = AnalysisWeightings::from_value(&json!({})).unwrap();
        assert_eq!(weightings, AnalysisWeightings::default());

        let violations = AnalysisWeightings::from_value(&json!({"team": 35.0})).unwrap_err();
        assert!(violations.has_rule(Rule::Invariant(Invariant::WeightingsSum)));
    }

    #[test]
    fn test_weighting_out_of_range_skips_sum_rule() {
        let violations = AnalysisWeightings::new(-10.0, 45.0, 35.0, 15.0, 15.0).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(violations.has_path("market_opportunity"));
        assert!(violations.has_rule(Rule::Minimum));
    }

    #[test]
    fn test_as_map_names_every_dimension() {
        let map = AnalysisWeightings::default().as_map();
        assert_eq!(map.len(), 5);
        assert_eq!(map["competitive_position"], 15.0);
        assert_eq!(map.values().sum::<f64>(), 100.0);
    }

    #[test]
    fn test_revenue_projection_progression() {
        assert!(RevenueProjection::new(2_000_000.0, 10_000_000.0, 50_000_000.0).is_ok());
        assert!(RevenueProjection::new(5.0, 5.0, 5.0).is_ok());

        let violations = RevenueProjection::new(2_000_000.0, 1_000_000.0, 50_000_000.0).unwrap_err();
        let violation = violations.iter().next().unwrap();
        assert_eq!(violation.rule, Rule::Invariant(Invariant::Year3AtLeastYear1));
        assert_eq!(violation.message, "year3 projection should not be less than year1");
        assert_eq!(violation.path.to_string(), "year3");

        let violations = RevenueProjection::new(1.0, 10.0, 5.0).unwrap_err();
        assert!(violations.has_rule(Rule::Invariant(Invariant::Year5AtLeastYear3)));
        assert!(violations.has_path("year5"));
    }

    #[test]
    fn test_projection_reports_first_broken_invariant_only() {
        let violations = RevenueProjection::new(10.0, 5.0, 1.0).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(violations.has_rule(Rule::Invariant(Invariant::Year3AtLeastYear1)));
    }

    #[test]
    fn test_weightings_constructor_rejects_non_finite() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let violations = AnalysisWeightings::new(bad, 25.0, 20.0, 15.0, 15.0).unwrap_err();
            assert_eq!(violations.len(), 1);
            assert_eq!(violations.entity(), "AnalysisWeightings");
            let violation = violations.iter().next().unwrap();
            assert_eq!(violation.rule, Rule::InvalidType);
            assert_eq!(violation.path.to_string(), "market_opportunity");
            assert_eq!(violation.message, "must be a finite number");
        }

        let violations = AnalysisWeightings::new(25.0, f64::NAN, 20.0, 15.0, f64::INFINITY).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert!(violations.has_path("team"));
        assert!(violations.has_path("competitive_position"));
    }

    #[test]
    fn test_projection_constructor_rejects_non_finite() {
        let violations = RevenueProjection::new(f64::NAN, 1.0, 2.0).unwrap_err();
        assert_eq!(violations.len(), 1);
        let violation = violations.iter().next().unwrap();
        assert_eq!(violation.rule, Rule::InvalidType);
        assert_eq!(violation.path.to_string(), "year1");
        assert_eq!(violation.message, "must be a finite number");

        let violations = RevenueProjection::new(1.0, 2.0, f64::INFINITY).unwrap_err();
        assert!(violations.has_path("year5"));
        assert!(!violations.has_rule(Rule::Invariant(Invariant::Year5AtLeastYear3)));
    }

    #[test]
    fn test_summary_signal_score_bounds() {
        let mut raw = memo_body()["summary"].clone();
        raw["signal_score"] = json!(150.0);
        let violations = DealMemoSummary::from_value(&raw).unwrap_err();
        assert!(violations.has_path("signal_score"));
        assert!(violations.has_rule(Rule::Maximum));
    }

    #[test]
    fn test_summary_recommendation_is_closed() {
        let mut raw = memo_body()["summary"].clone();
        raw["recommendation"] = json!("maybe");
        assert!(DealMemoSummary::from_value(&raw).unwrap_err().has_rule(Rule::InvalidEnum));
    }

    #[test]
    fn test_growth_list_items_checked_individually() {
        let mut raw = memo_body()["growth_potential"].clone();
        raw["key_drivers"] = json!(["Market expansion", "AI", "Team scaling"]);
        raw["scalability_factors"] = json!([]);
        let violations = GrowthPotential::from_value(&raw).unwrap_err();
        assert_eq!(violations.len(), 2);

        let driver = violations.iter().find(|v| v.rule == Rule::ItemLength).unwrap();
        assert_eq!(driver.path.to_string(), "key_drivers[1]");
        assert_eq!(driver.message, "Each key driver must be between 5 and 200 characters");
        assert!(violations.has_rule(Rule::MinItems));
    }

    #[test]
    fn test_recommendation_item_messages() {
        let mut raw = memo_body()["investment_recommendation"].clone();
        raw["suggested_terms"] = json!(["Seat"]);
        raw["key_diligence_questions"] = json!(["Why?"]);
        raw["follow_up_actions"] = json!(["x".repeat(201)]);
        let violations = InvestmentRecommendation::from_value(&raw).unwrap_err();
        let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Each suggested term must be between 5 and 200 characters",
                "Each diligence question must be between 10 and 300 characters",
                "Each follow-up action must be between 5 and 200 characters",
            ]
        );
    }

    #[test]
    fn test_narrative_minimum_length() {
        let mut raw = memo_body()["investment_recommendation"].clone();
        raw["narrative"] = json!("Too short to be a narrative.");
        let violations = InvestmentRecommendation::from_value(&raw).unwrap_err();
        assert!(violations.has_path("narrative"));
        assert!(violations.has_rule(Rule::MinLength));
    }

    #[test]
    fn test_metadata_bounds() {
        let mut raw = memo_body()["metadata"].clone();
        raw["processing_time"] = json!(-1.0);
        raw["data_quality"] = json!(1.5);
        raw["analysis_version"] = json!("v".repeat(21));
        let violations = DealMemoMetadata::from_value(&raw).unwrap_err();
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_nested_failures_are_all_located() {
        let mut raw = deal_memo();
        raw["aegis_deal_memo"]["summary"]["signal_score"] = json!(150.0);
        raw["aegis_deal_memo"]["growth_potential"]["key_drivers"][2] = json!("Go");
        raw["aegis_deal_memo"]["key_benchmarks"][0]["percentile"] = json!(101.0);
        raw["aegis_deal_memo"]["analysis_weightings"]["team"] = json!(35.0);

        let violations = DealMemo::from_value(&raw).unwrap_err();
        assert_eq!(violations.entity(), "DealMemo");
        assert!(violations.has_path("aegis_deal_memo.summary.signal_score"));
        assert!(violations.has_path("aegis_deal_memo.growth_potential.key_drivers[2]"));
        assert!(violations.has_path("aegis_deal_memo.key_benchmarks[0].percentile"));
        assert!(violations.has_path("aegis_deal_memo.analysis_weightings"));
        assert_eq!(violations.len(), 4);
    }

    #[test]
    fn test_missing_sections() {
        let mut raw = deal_memo();
        let body = raw["aegis_deal_memo"].as_object_mut().unwrap();
        body.remove("metadata");
        body.remove("risk_assessment");

        let violations = DealMemo::from_value(&raw).unwrap_err();
        assert!(violations.iter().all(|v| v.rule == Rule::Missing));
        assert!(violations.has_path("aegis_deal_memo.metadata"));
        assert!(violations.has_path("aegis_deal_memo.risk_assessment"));
    }

    proptest! {
        #[test]
        fn prop_weightings_sum_rule(
            parts in prop::collection::vec(0.0f64..40.0, 4),
            skew in prop_oneof![-0.009f64..0.009, -5.0f64..5.0],
        ) {
            let partial: f64 = parts.iter().sum();
            let last = WEIGHTINGS_TOTAL - partial + skew;
            prop_assume!((0.0..=100.0).contains(&last));
            let total = partial + last;
            prop_assume!(((total - WEIGHTINGS_TOTAL).abs() - WEIGHTINGS_TOLERANCE).abs() > 1e-9);

            let outcome = AnalysisWeightings::new(parts[0], parts[1], parts[2], parts[3], last);
            if (total - WEIGHTINGS_TOTAL).abs() <= WEIGHTINGS_TOLERANCE {
                prop_assert!(outcome.is_ok());
            } else {
                let violations = outcome.unwrap_err();
                prop_assert!(violations.iter().any(|v| v.message.contains("sum to 100")));
            }
        }

        #[test]
        fn prop_projection_monotonic(
            year1 in 0.0f64..1e9,
            year3 in 0.0f64..1e9,
            year5 in 0.0f64..1e9,
        ) {
            let outcome = RevenueProjection::new(year1, year3, year5);
            prop_assert_eq!(outcome.is_ok(), year3 >= year1 && year5 >= year3);
        }
    }
}
