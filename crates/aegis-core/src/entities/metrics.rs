//! Investment metrics extracted from pitch material.
//!
//! Four snapshot groups (revenue, traction, team, funding) plus the
//! provenance of the extraction. Nearly every figure is optional because
//! source documents rarely disclose all of them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{TeamMember, Tracked};
use crate::schema::{Bounds, Checked, Entity, Length, Reader, Violations};
use crate::types::FundingStage;
use crate::ValidationError;

/// Growth rates are percentages; -100 means the metric vanished.
fn growth_rate() -> Bounds<f64> {
    Bounds::between(-100.0, 10_000.0)
}

fn percentage() -> Bounds<f64> {
    Bounds::between(0.0, 100.0)
}

fn non_negative() -> Bounds<f64> {
    Bounds::at_least(0.0)
}

/// Financial traction snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    arr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mrr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    growth_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    projected_arr: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    revenue_run_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gross_margin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    net_revenue_retention: Option<f64>,
}

impl Entity for RevenueMetrics {
    const NAME: &'static str = "RevenueMetrics";
    const FIELDS: &'static [&'static str] = &[
        "arr",
        "mrr",
        "growth_rate",
        "projected_arr",
        "revenue_run_rate",
        "gross_margin",
        "net_revenue_retention",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let arr = r.opt_number("arr", non_negative());
        let mrr = r.opt_number("mrr", non_negative());
        let growth_rate = r.opt_number("growth_rate", growth_rate());
        let projected_arr = r.opt_numbers(
            "projected_arr",
            non_negative(),
            "All projected ARR values must be non-negative",
        );
        let revenue_run_rate = r.opt_number("revenue_run_rate", non_negative());
        let gross_margin = r.opt_number("gross_margin", percentage());
        let net_revenue_retention = r.opt_number("net_revenue_retention", Bounds::between(0.0, 500.0));

        Ok(Self {
            arr: arr?,
            mrr: mrr?,
            growth_rate: growth_rate?,
            projected_arr: projected_arr?,
            revenue_run_rate: revenue_run_rate?,
            gross_margin: gross_margin?,
            net_revenue_retention: net_revenue_retention?,
        })
    }
}

impl RevenueMetrics {
    pub fn arr(&self) -> Option<f64> {
        self.arr
    }

    pub fn mrr(&self) -> Option<f64> {
        self.mrr
    }

    pub fn growth_rate(&self) -> Option<f64> {
        self.growth_rate
    }

    pub fn projected_arr(&self) -> Option<&[f64]> {
        self.projected_arr.as_deref()
    }

    pub fn revenue_run_rate(&self) -> Option<f64> {
        self.revenue_run_rate
    }

    pub fn gross_margin(&self) -> Option<f64> {
        self.gross_margin
    }

    pub fn net_revenue_retention(&self) -> Option<f64> {
        self.net_revenue_retention
    }
}

/// Usage and engagement snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TractionMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    customers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_growth_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    churn_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active_users: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversion_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ltv: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cac: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ltv_cac_ratio: Option<f64>,
}

impl Entity for TractionMetrics {
    const NAME: &'static str = "TractionMetrics";
    const FIELDS: &'static [&'static str] = &[
        "customers",
        "customer_growth_rate",
        "churn_rate",
        "nps",
        "active_users",
        "conversion_rate",
        "ltv",
        "cac",
        "ltv_cac_ratio",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let customers = r.opt_integer("customers", Bounds::at_least(0));
        let customer_growth_rate = r.opt_number("customer_growth_rate", growth_rate());
        let churn_rate = r.opt_number("churn_rate", percentage());
        let nps = r.opt_number("nps", Bounds::between(-100.0, 100.0));
        let active_users = r.opt_integer("active_users", Bounds::at_least(0));
        let conversion_rate = r.opt_number("conversion_rate", percentage());
        let ltv = r.opt_number("ltv", non_negative());
        let cac = r.opt_number("cac", non_negative());
        let ltv_cac_ratio = r.opt_number("ltv_cac_ratio", non_negative());

        Ok(Self {
            customers: customers?,
            customer_growth_rate: customer_growth_rate?,
            churn_rate: churn_rate?,
            nps: nps?,
            active_users: active_users?,
            conversion_rate: conversion_rate?,
            ltv: ltv?,
            cac: cac?,
            ltv_cac_ratio: ltv_cac_ratio?,
        })
    }
}

impl TractionMetrics {
    pub fn customers(&self) -> Option<u64> {
        self.customers
    }

    pub fn customer_growth_rate(&self) -> Option<f64> {
        self.customer_growth_rate
    }

    pub fn churn_rate(&self) -> Option<f64> {
        self.churn_rate
    }

    pub fn nps(&self) -> Option<f64> {
        self.nps
    }

    pub fn active_users(&self) -> Option<u64> {
        self.active_users
    }

    pub fn conversion_rate(&self) -> Option<f64> {
        self.conversion_rate
    }

    pub fn ltv(&self) -> Option<f64> {
        self.ltv
    }

    pub fn cac(&self) -> Option<f64> {
        self.cac
    }

    pub fn ltv_cac_ratio(&self) -> Option<f64> {
        self.ltv_cac_ratio
    }
}

/// Organisation composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMetrics {
    size: u32,
    founders_count: u32,
    key_hires: Vec<TeamMember>,
    #[serde(skip_serializing_if = "Option::is_none")]
    engineering_team_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sales_team_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    burn_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    runway: Option<f64>,
}

impl Entity for TeamMetrics {
    const NAME: &'static str = "TeamMetrics";
    const FIELDS: &'static [&'static str] = &[
        "size",
        "founders_count",
        "key_hires",
        "engineering_team_size",
        "sales_team_size",
        "burn_rate",
        "runway",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let size = r.integer("size", Bounds::between(1, 10_000));
        let founders_count = r.integer("founders_count", Bounds::between(1, 20));
        let key_hires = r.entities("key_hires");
        let engineering_team_size = r.opt_integer("engineering_team_size", Bounds::at_least(0));
        let sales_team_size = r.opt_integer("sales_team_size", Bounds::at_least(0));
        let burn_rate = r.opt_number("burn_rate", non_negative());
        let runway = r.opt_number("runway", non_negative());

        Ok(Self {
            size: size?,
            founders_count: founders_count?,
            key_hires: key_hires?,
            engineering_team_size: engineering_team_size?,
            sales_team_size: sales_team_size?,
            burn_rate: burn_rate?,
            runway: runway?,
        })
    }
}

impl TeamMetrics {
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn founders_count(&self) -> u32 {
        self.founders_count
    }

    pub fn key_hires(&self) -> &[TeamMember] {
        &self.key_hires
    }

    pub fn engineering_team_size(&self) -> Option<u64> {
        self.engineering_team_size
    }

    pub fn sales_team_size(&self) -> Option<u64> {
        self.sales_team_size
    }

    pub fn burn_rate(&self) -> Option<f64> {
        self.burn_rate
    }

    pub fn runway(&self) -> Option<f64> {
        self.runway
    }
}

/// Fundraising history and current ask.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    total_raised: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_round_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_round_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_ask: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    valuation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pre_money_valuation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_money_valuation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<FundingStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lead_investor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    use_of_funds: Option<Vec<String>>,
}

impl Entity for FundingMetrics {
    const NAME: &'static str = "FundingMetrics";
    const FIELDS: &'static [&'static str] = &[
        "total_raised",
        "last_round_size",
        "last_round_date",
        "current_ask",
        "valuation",
        "pre_money_valuation",
        "post_money_valuation",
        "stage",
        "lead_investor",
        "use_of_funds",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let total_raised = r.opt_number("total_raised", non_negative());
        let last_round_size = r.opt_number("last_round_size", non_negative());
        let last_round_date = r.opt_datetime("last_round_date");
        let current_ask = r.opt_number("current_ask", non_negative());
        let valuation = r.opt_number("valuation", non_negative());
        let pre_money_valuation = r.opt_number("pre_money_valuation", non_negative());
        let post_money_valuation = r.opt_number("post_money_valuation", non_negative());
        let stage = r.opt_choice("stage");
        let lead_investor = r.opt_string("lead_investor", Length::any());
        let use_of_funds = r.opt_strings("use_of_funds");

        Ok(Self {
            total_raised: total_raised?,
            last_round_size: last_round_size?,
            last_round_date: last_round_date?,
            current_ask: current_ask?,
            valuation: valuation?,
            pre_money_valuation: pre_money_valuation?,
            post_money_valuation: post_money_valuation?,
            stage: stage?,
            lead_investor: lead_investor?,
            use_of_funds: use_of_funds?,
        })
    }
}

impl FundingMetrics {
    pub fn total_raised(&self) -> Option<f64> {
        self.total_raised
    }

    pub fn last_round_size(&self) -> Option<f64> {
        self.last_round_size
    }

    pub fn last_round_date(&self) -> Option<DateTime<Utc>> {
        self.last_round_date
    }

    pub fn current_ask(&self) -> Option<f64> {
        self.current_ask
    }

    pub fn valuation(&self) -> Option<f64> {
        self.valuation
    }

    pub fn pre_money_valuation(&self) -> Option<f64> {
        self.pre_money_valuation
    }

    pub fn post_money_valuation(&self) -> Option<f64> {
        self.post_money_valuation
    }

    pub fn stage(&self) -> Option<FundingStage> {
        self.stage
    }

    pub fn lead_investor(&self) -> Option<&str> {
        self.lead_investor.as_deref()
    }

    pub fn use_of_funds(&self) -> Option<&[String]> {
        self.use_of_funds.as_deref()
    }
}

/// The four metric groups plus extraction provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentMetrics {
    #[serde(flatten)]
    tracked: Tracked,
    revenue: RevenueMetrics,
    traction: TractionMetrics,
    team: TeamMetrics,
    funding: FundingMetrics,
    extraction_timestamp: DateTime<Utc>,
    source_documents: Vec<String>,
    confidence: f64,
}

impl Entity for InvestmentMetrics {
    const NAME: &'static str = "InvestmentMetrics";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "revenue",
        "traction",
        "team",
        "funding",
        "extraction_timestamp",
        "source_documents",
        "confidence",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let tracked = Tracked::read(r);
        let revenue = r.entity("revenue");
        let traction = r.entity("traction");
        let team = r.entity("team");
        let funding = r.entity("funding");
        let extraction_timestamp = r.datetime("extraction_timestamp");
        let source_documents = r.strings("source_documents");
        let confidence = r.number("confidence", Bounds::between(0.0, 1.0));

        Ok(Self {
            tracked: tracked?,
            revenue: revenue?,
            traction: traction?,
            team: team?,
            funding: funding?,
            extraction_timestamp: extraction_timestamp?,
            source_documents: source_documents?,
            confidence: confidence?,
        })
    }

    fn failure(violations: Violations) -> ValidationError {
        ValidationError::InvestmentMetrics(violations)
    }
}

impl InvestmentMetrics {
    pub fn tracked(&self) -> &Tracked {
        &self.tracked
    }

    pub fn revenue(&self) -> &RevenueMetrics {
        &self.revenue
    }

    pub fn traction(&self) -> &TractionMetrics {
        &self.traction
    }

    pub fn team(&self) -> &TeamMetrics {
        &self.team
    }

    pub fn funding(&self) -> &FundingMetrics {
        &self.funding
    }

    pub fn extraction_timestamp(&self) -> DateTime<Utc> {
        self.extraction_timestamp
    }

    pub fn source_documents(&self) -> &[String] {
        &self.source_documents
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Rule;
    use crate::testing::investment_metrics;
    use serde_json::json;

    fn violations_for(raw: &serde_json::Value) -> Violations {
        InvestmentMetrics::from_value(raw).unwrap_err()
    }

    #[test]
    fn test_valid_investment_metrics() {
        let metrics = InvestmentMetrics::from_value(&investment_metrics()).unwrap();
        assert_eq!(metrics.revenue().arr(), Some(1_000_000.0));
        assert_eq!(metrics.revenue().projected_arr(), Some(&[1_000_000.0, 2_000_000.0, 4_000_000.0][..]));
        assert_eq!(metrics.traction().customers(), Some(50));
        assert_eq!(metrics.team().key_hires()[0].name(), "John Doe");
        assert_eq!(metrics.confidence(), 0.85);
    }

    #[test]
    fn test_negative_arr() {
        let mut raw = investment_metrics();
        raw["revenue"]["arr"] = json!(-1000.0);
        let violations = violations_for(&raw);
        assert!(violations.has_path("revenue.arr"));
        assert!(violations.has_rule(Rule::Minimum));
    }

    #[test]
    fn test_churn_rate_over_100() {
        let mut raw = investment_metrics();
        raw["traction"]["churn_rate"] = json!(150.0);
        assert!(violations_for(&raw).has_path("traction.churn_rate"));
    }

    #[test]
    fn test_confidence_over_1() {
        let mut raw = investment_metrics();
        raw["confidence"] = json!(1.5);
        assert!(violations_for(&raw).has_path("confidence"));
    }

    #[test]
    fn test_team_size_zero() {
        let mut raw = investment_metrics();
        raw["team"]["size"] = json!(0);
        assert!(violations_for(&raw).has_path("team.size"));
    }

    #[test]
    fn test_large_team_breakdown_accepted() {
        let mut raw = investment_metrics();
        raw["team"]["engineering_team_size"] = json!(5_000_000_000u64);
        raw["team"]["sales_team_size"] = json!(4_294_967_296u64);
        let metrics = InvestmentMetrics::from_value(&raw).unwrap();
        assert_eq!(metrics.team().engineering_team_size(), Some(5_000_000_000));
        assert_eq!(metrics.team().sales_team_size(), Some(4_294_967_296));

        raw["team"]["size"] = json!(5_000_000_000u64);
        let violations = violations_for(&raw);
        let violation = violations.iter().next().unwrap();
        assert_eq!(violation.path.to_string(), "team.size");
        assert_eq!(violation.rule, Rule::Maximum);
    }

    #[test]
    fn test_projected_arr_negative_item() {
        let mut raw = investment_metrics();
        raw["revenue"]["projected_arr"] = json!([1_000_000.0, -500_000.0, 2_000_000.0]);
        let violations = violations_for(&raw);
        let violation = violations.iter().next().unwrap();
        assert_eq!(violation.path.to_string(), "revenue.projected_arr[1]");
        assert_eq!(violation.message, "All projected ARR values must be non-negative");
    }

    #[test]
    fn test_nested_failures_report_deepest_field() {
        let mut raw = investment_metrics();
        raw["team"]["key_hires"][0]["years_experience"] = json!(75);
        raw["traction"]["nps"] = json!(-120.0);
        let violations = violations_for(&raw);
        assert_eq!(violations.len(), 2);
        assert!(violations.has_path("traction.nps"));
        assert!(violations.has_path("team.key_hires[0].years_experience"));
    }

    #[test]
    fn test_missing_metric_group() {
        let mut raw = investment_metrics();
        raw.as_object_mut().unwrap().remove("funding");
        let violations = violations_for(&raw);
        assert!(violations.has_path("funding"));
        assert!(violations.has_rule(Rule::Missing));
    }

    #[test]
    fn test_metric_groups_accept_empty_objects() {
        assert!(RevenueMetrics::from_value(&json!({})).is_ok());
        assert!(TractionMetrics::from_value(&json!({})).is_ok());
        assert!(FundingMetrics::from_value(&json!({})).is_ok());
        assert!(TeamMetrics::from_value(&json!({})).is_err());
    }

    #[test]
    fn test_founders_count_bounds() {
        let team = |founders: i64| json!({"size": 10, "founders_count": founders, "key_hires": []});
        assert!(TeamMetrics::from_value(&team(1)).is_ok());
        assert!(TeamMetrics::from_value(&team(20)).is_ok());
        assert!(TeamMetrics::from_value(&team(0)).is_err());
        assert!(TeamMetrics::from_value(&team(21)).is_err());
    }

    #[test]
    fn test_funding_stage_must_be_known() {
        let violations = FundingMetrics::from_value(&json!({"stage": "series-z"})).unwrap_err();
        assert!(violations.has_rule(Rule::InvalidEnum));
    }
}
