//! Risk flags and the aggregated risk assessment.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Tracked;
use crate::schema::{Bounds, Checked, Entity, ItemLength, Length, Reader};
use crate::types::{RiskCategory, RiskImpact, RiskLikelihood, RiskSeverity, RiskType};

/// One identified risk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskFlag {
    #[serde(flatten)]
    tracked: Tracked,
    #[serde(rename = "type")]
    risk_type: RiskType,
    severity: RiskSeverity,
    title: String,
    description: String,
    affected_metrics: Vec<String>,
    suggested_mitigation: String,
    source_documents: Vec<String>,
    confidence: f64,
    impact: RiskImpact,
    likelihood: RiskLikelihood,
    category: RiskCategory,
    detected_at: DateTime<Utc>,
    evidence: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    related_flags: Option<Vec<String>>,
}

impl Entity for RiskFlag {
    const NAME: &'static str = "RiskFlag";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "type",
        "severity",
        "title",
        "description",
        "affected_metrics",
        "suggested_mitigation",
        "source_documents",
        "confidence",
        "impact",
        "likelihood",
        "category",
        "detected_at",
        "evidence",
        "related_flags",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let tracked = Tracked::read(r);
        let risk_type = r.choice("type");
        let severity = r.choice("severity");
        let title = r.string("title", Length::between(1, 200));
        let description = r.string("description", Length::between(10, 1000));
        let affected_metrics = r.strings("affected_metrics");
        let suggested_mitigation = r.string("suggested_mitigation", Length::between(10, 1000));
        let source_documents = r.strings("source_documents");
        let confidence = r.number("confidence", Bounds::between(0.0, 1.0));
        let impact = r.choice("impact");
        let likelihood = r.choice("likelihood");
        let category = r.choice("category");
        let detected_at = r.datetime("detected_at");
        let evidence = r.strings("evidence");
        let related_flags = r.opt_strings("related_flags");

        Ok(Self {
            tracked: tracked?,
            risk_type: risk_type?,
            severity: severity?,
            title: title?,
            description: description?,
            affected_metrics: affected_metrics?,
            suggested_mitigation: suggested_mitigation?,
            source_documents: source_documents?,
            confidence: confidence?,
            impact: impact?,
            likelihood: likelihood?,
            category: category?,
            detected_at: detected_at?,
            evidence: evidence?,
            related_flags: related_flags?,
        })
    }
}

impl RiskFlag {
    pub fn tracked(&self) -> &Tracked {
        &self.tracked
    }

    pub fn risk_type(&self) -> RiskType {
        self.risk_type
    }

    pub fn severity(&self) -> RiskSeverity {
        self.severity
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn affected_metrics(&self) -> &[String] {
        &self.affected_metrics
    }

    pub fn suggested_mitigation(&self) -> &str {
        &self.suggested_mitigation
    }

    pub fn source_documents(&self) -> &[String] {
        &self.source_documents
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn impact(&self) -> RiskImpact {
        self.impact
    }

    pub fn likelihood(&self) -> RiskLikelihood {
        self.likelihood
    }

    pub fn category(&self) -> RiskCategory {
        self.category
    }

    pub fn detected_at(&self) -> DateTime<Utc> {
        self.detected_at
    }

    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    pub fn related_flags(&self) -> Option<&[String]> {
        self.related_flags.as_deref()
    }
}

/// Aggregated risk view of a memo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    overall_risk_score: f64,
    high_priority_risks: Vec<RiskFlag>,
    medium_priority_risks: Vec<RiskFlag>,
    low_priority_risks: Vec<RiskFlag>,
    risk_mitigation_plan: Vec<String>,
}

impl Entity for RiskAssessment {
    const NAME: &'static str = "RiskAssessment";
    const FIELDS: &'static [&'static str] = &[
        "overall_risk_score",
        "high_priority_risks",
        "medium_priority_risks",
        "low_priority_risks",
        "risk_mitigation_plan",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let overall_risk_score = r.number("overall_risk_score", Bounds::between(0.0, 100.0));
        let high_priority_risks = r.entities("high_priority_risks");
        let medium_priority_risks = r.entities("medium_priority_risks");
        let low_priority_risks = r.entities("low_priority_risks");
        let risk_mitigation_plan = r.bounded_strings(
            "risk_mitigation_plan",
            ItemLength::new(10, 500, "Each mitigation plan item must be between 10 and 500 characters"),
        );

        Ok(Self {
            overall_risk_score: overall_risk_score?,
            high_priority_risks: high_priority_risks?,
            medium_priority_risks: medium_priority_risks?,
            low_priority_risks: low_priority_risks?,
            risk_mitigation_plan: risk_mitigation_plan?,
        })
    }
}

impl RiskAssessment {
    pub fn overall_risk_score(&self) -> f64 {
        self.overall_risk_score
    }

    pub fn high_priority_risks(&self) -> &[RiskFlag] {
        &self.high_priority_risks
    }

    pub fn medium_priority_risks(&self) -> &[RiskFlag] {
        &self.medium_priority_risks
    }

    pub fn low_priority_risks(&self) -> &[RiskFlag] {
        &self.low_priority_risks
    }

    /// All flags, highest priority first.
    pub fn all_risks(&self) -> impl Iterator<Item = &RiskFlag> {
        self.high_priority_risks
            .iter()
            .chain(self.medium_priority_risks.iter())
            .chain(self.low_priority_risks.iter())
    }

    pub fn risk_mitigation_plan(&self) -> &[String] {
        &self.risk_mitigation_plan
    }
}
