//! Deal memo entities.
//!
//! Every entity is immutable once constructed: fields are private, read
//! through accessors, and only [`Entity::read`](crate::schema::Entity::read)
//! can build one.

mod benchmark;
mod company;
mod memo;
mod metrics;
mod risk;
mod tracked;

pub use benchmark::{BenchmarkComparison, BenchmarkData, MetricDistribution, TimeRange};
pub use company::{CompanyProfile, SocialLinks, TeamMember, MIN_FOUNDED_YEAR};
pub use memo::{
    AegisDealMemo, AnalysisWeightings, DealMemo, DealMemoMetadata, DealMemoSummary, GrowthPotential,
    InvestmentRecommendation, RevenueProjection, WEIGHTINGS_TOLERANCE, WEIGHTINGS_TOTAL,
};
pub use metrics::{FundingMetrics, InvestmentMetrics, RevenueMetrics, TeamMetrics, TractionMetrics};
pub use risk::{RiskAssessment, RiskFlag};
pub use tracked::Tracked;
