//! Closed value sets used across the deal memo schema.
//!
//! Every enum serializes to the same canonical text it accepts. Parsing
//! anything else is a structural violation; there is no fallback variant.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schema::Choice;

/// Fundraising stage of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FundingStage {
    PreSeed,
    Seed,
    SeriesA,
    SeriesB,
    SeriesC,
    LaterStage,
}

impl Choice for FundingStage {
    const ALL: &'static [Self] = &[
        Self::PreSeed,
        Self::Seed,
        Self::SeriesA,
        Self::SeriesB,
        Self::SeriesC,
        Self::LaterStage,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::PreSeed => "pre-seed",
            Self::Seed => "seed",
            Self::SeriesA => "series-a",
            Self::SeriesB => "series-b",
            Self::SeriesC => "series-c",
            Self::LaterStage => "later-stage",
        }
    }
}

/// Final investment call of a memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationType {
    StrongBuy,
    Buy,
    Hold,
    Pass,
    StrongPass,
}

impl RecommendationType {
    /// Whether the recommendation favours investing.
    pub fn is_positive(self) -> bool {
        matches!(self, Self::StrongBuy | Self::Buy)
    }
}

impl Choice for RecommendationType {
    const ALL: &'static [Self] = &[
        Self::StrongBuy,
        Self::Buy,
        Self::Hold,
        Self::Pass,
        Self::StrongPass,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::StrongBuy => "strong-buy",
            Self::Buy => "buy",
            Self::Hold => "hold",
            Self::Pass => "pass",
            Self::StrongPass => "strong-pass",
        }
    }
}

/// Kind of risk a flag describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskType {
    Inconsistency,
    MarketSize,
    FinancialAnomaly,
    CompetitiveRisk,
    TeamRisk,
    TechnicalRisk,
}

impl Choice for RiskType {
    const ALL: &'static [Self] = &[
        Self::Inconsistency,
        Self::MarketSize,
        Self::FinancialAnomaly,
        Self::CompetitiveRisk,
        Self::TeamRisk,
        Self::TechnicalRisk,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Inconsistency => "inconsistency",
            Self::MarketSize => "market-size",
            Self::FinancialAnomaly => "financial-anomaly",
            Self::CompetitiveRisk => "competitive-risk",
            Self::TeamRisk => "team-risk",
            Self::TechnicalRisk => "technical-risk",
        }
    }
}

/// Severity of a risk flag. Canonical text is upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskSeverity {
    High,
    Medium,
    Low,
}

impl Choice for RiskSeverity {
    const ALL: &'static [Self] = &[Self::High, Self::Medium, Self::Low];

    fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// Impact of a risk if it materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskImpact {
    Low,
    Medium,
    High,
    Critical,
}

impl Choice for RiskImpact {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Critical];

    fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Likelihood that a risk materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLikelihood {
    Low,
    Medium,
    High,
}

impl Choice for RiskLikelihood {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High];

    fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Business area a risk belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Financial,
    Market,
    Team,
    Product,
    Competitive,
    Operational,
}

impl Choice for RiskCategory {
    const ALL: &'static [Self] = &[
        Self::Financial,
        Self::Market,
        Self::Team,
        Self::Product,
        Self::Competitive,
        Self::Operational,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Financial => "financial",
            Self::Market => "market",
            Self::Team => "team",
            Self::Product => "product",
            Self::Competitive => "competitive",
            Self::Operational => "operational",
        }
    }
}

/// Format of an uploaded source document.
///
/// Memos cite their sources by name; this is the vocabulary ingestion uses
/// to classify them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Docx,
    Pptx,
    Txt,
    Zip,
}

impl Choice for DocumentType {
    const ALL: &'static [Self] = &[Self::Pdf, Self::Docx, Self::Pptx, Self::Txt, Self::Zip];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Pptx => "pptx",
            Self::Txt => "txt",
            Self::Zip => "zip",
        }
    }
}

macro_rules! display_as_choice {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(Choice::as_str(*self))
                }
            }
        )+
    };
}

display_as_choice!(
    FundingStage,
    RecommendationType,
    RiskType,
    RiskSeverity,
    RiskImpact,
    RiskLikelihood,
    RiskCategory,
    DocumentType,
);
