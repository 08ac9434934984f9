//! Sector benchmark datasets and company-versus-sector comparisons.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Tracked;
use crate::schema::{
    Bounds, Checked, Entity, FieldPath, Invariant, Length, Reader, Rule, Violation, Violations,
};
use crate::types::FundingStage;

/// Sector statistical distribution of one metric.
///
/// Only `min <= median <= max` is enforced; the percentiles, mean and
/// standard deviation are taken as reported.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDistribution {
    min: f64,
    max: f64,
    median: f64,
    p25: f64,
    p75: f64,
    p90: f64,
    mean: f64,
    std_dev: f64,
    sample_size: u64,
}

impl Entity for MetricDistribution {
    const NAME: &'static str = "MetricDistribution";
    const FIELDS: &'static [&'static str] = &[
        "min",
        "max",
        "median",
        "p25",
        "p75",
        "p90",
        "mean",
        "std_dev",
        "sample_size",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let min = r.number("min", Bounds::any());
        let max = r.number("max", Bounds::any());
        let median = r.number("median", Bounds::any());
        let p25 = r.number("p25", Bounds::any());
        let p75 = r.number("p75", Bounds::any());
        let p90 = r.number("p90", Bounds::any());
        let mean = r.number("mean", Bounds::any());
        let std_dev = r.number("std_dev", Bounds::any());
        let sample_size = r.integer("sample_size", Bounds::at_least(1));

        let distribution = Self {
            min: min?,
            max: max?,
            median: median?,
            p25: p25?,
            p75: p75?,
            p90: p90?,
            mean: mean?,
            std_dev: std_dev?,
            sample_size: sample_size?,
        };
        distribution.check(r)?;
        Ok(distribution)
    }
}

impl MetricDistribution {
    fn check(&self, r: &mut Reader<'_>) -> Checked<()> {
        if self.max < self.min {
            return Err(r.reject(
                "max",
                Rule::Invariant(Invariant::MaxAtLeastMin),
                "max must be greater than or equal to min",
            ));
        }
        if !(self.min <= self.median && self.median <= self.max) {
            return Err(r.reject(
                "median",
                Rule::Invariant(Invariant::MedianWithinRange),
                "median must be between min and max",
            ));
        }
        Ok(())
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn median(&self) -> f64 {
        self.median
    }

    pub fn p25(&self) -> f64 {
        self.p25
    }

    pub fn p75(&self) -> f64 {
        self.p75
    }

    pub fn p90(&self) -> f64 {
        self.p90
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn sample_size(&self) -> u64 {
        self.sample_size
    }
}

/// Validity window of a benchmark dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeRange {
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

impl Entity for TimeRange {
    const NAME: &'static str = "TimeRange";
    const FIELDS: &'static [&'static str] = &["start_date", "end_date"];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let start_date = r.datetime("start_date");
        let end_date = r.datetime("end_date");

        let range = Self {
            start_date: start_date?,
            end_date: end_date?,
        };
        if range.end_date < range.start_date {
            return Err(r.reject(
                "end_date",
                Rule::Invariant(Invariant::EndAfterStart),
                "end_date must be after start_date",
            ));
        }
        Ok(range)
    }
}

impl TimeRange {
    /// Build a range, enforcing the same ordering as raw input.
    ///
    /// Typed instants are checked directly: years outside 0..=9999 have no
    /// RFC 3339 form and would not survive a trip through JSON text.
    pub fn new(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Result<Self, Violations> {
        if end_date < start_date {
            return Err(Violations::new(
                Self::NAME,
                vec![Violation::new(
                    FieldPath::root().key("end_date"),
                    Rule::Invariant(Invariant::EndAfterStart),
                    "end_date must be after start_date",
                )],
            ));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    /// Whether `instant` falls inside the window (inclusive).
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start_date <= instant && instant <= self.end_date
    }
}

/// Sector comparison dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkData {
    #[serde(flatten)]
    tracked: Tracked,
    sector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub_sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<FundingStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    geography: Option<String>,
    sample_size: u64,
    metrics: BTreeMap<String, MetricDistribution>,
    last_updated: DateTime<Utc>,
    data_source: String,
    methodology: String,
    confidence: f64,
    time_range: TimeRange,
}

impl Entity for BenchmarkData {
    const NAME: &'static str = "BenchmarkData";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "sector",
        "sub_sector",
        "stage",
        "geography",
        "sample_size",
        "metrics",
        "last_updated",
        "data_source",
        "methodology",
        "confidence",
        "time_range",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let tracked = Tracked::read(r);
        let sector = r.string("sector", Length::between(1, 100));
        let sub_sector = r.opt_string("sub_sector", Length::at_most(100));
        let stage = r.opt_choice("stage");
        let geography = r.opt_string("geography", Length::at_most(100));
        let sample_size = r.integer("sample_size", Bounds::at_least(1));
        let metrics = r.entity_map("metrics");
        let last_updated = r.datetime("last_updated");
        let data_source = r.string("data_source", Length::between(1, 200));
        let methodology = r.string("methodology", Length::between(10, 1000));
        let confidence = r.number("confidence", Bounds::between(0.0, 1.0));
        let time_range = r.entity("time_range");

        Ok(Self {
            tracked: tracked?,
            sector: sector?,
            sub_sector: sub_sector?,
            stage: stage?,
            geography: geography?,
            sample_size: sample_size?,
            metrics: metrics?,
            last_updated: last_updated?,
            data_source: data_source?,
            methodology: methodology?,
            confidence: confidence?,
            time_range: time_range?,
        })
    }
}

impl BenchmarkData {
    pub fn tracked(&self) -> &Tracked {
        &self.tracked
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn sub_sector(&self) -> Option<&str> {
        self.sub_sector.as_deref()
    }

    pub fn stage(&self) -> Option<FundingStage> {
        self.stage
    }

    pub fn geography(&self) -> Option<&str> {
        self.geography.as_deref()
    }

    pub fn sample_size(&self) -> u64 {
        self.sample_size
    }

    pub fn metrics(&self) -> &BTreeMap<String, MetricDistribution> {
        &self.metrics
    }

    /// Distribution for one metric name.
    pub fn metric(&self, name: &str) -> Option<&MetricDistribution> {
        self.metrics.get(name)
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    pub fn methodology(&self) -> &str {
        &self.methodology
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn time_range(&self) -> &TimeRange {
        &self.time_range
    }
}

/// One company-versus-sector metric comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    metric: String,
    company_value: f64,
    sector_median: f64,
    percentile: f64,
    interpretation: String,
    context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendation: Option<String>,
}

impl Entity for BenchmarkComparison {
    const NAME: &'static str = "BenchmarkComparison";
    const FIELDS: &'static [&'static str] = &[
        "metric",
        "company_value",
        "sector_median",
        "percentile",
        "interpretation",
        "context",
        "recommendation",
    ];

    fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let metric = r.string("metric", Length::between(1, 100));
        let company_value = r.number("company_value", Bounds::any());
        let sector_median = r.number("sector_median", Bounds::any());
        let percentile = r.number("percentile", Bounds::between(0.0, 100.0));
        let interpretation = r.string("interpretation", Length::between(10, 500));
        let context = r.string("context", Length::between(10, 500));
        let recommendation = r.opt_string("recommendation", Length::at_most(500));

        Ok(Self {
            metric: metric?,
            company_value: company_value?,
            sector_median: sector_median?,
            percentile: percentile?,
            interpretation: interpretation?,
            context: context?,
            recommendation: recommendation?,
        })
    }
}

impl BenchmarkComparison {
    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn company_value(&self) -> f64 {
        self.company_value
    }

    pub fn sector_median(&self) -> f64 {
        self.sector_median
    }

    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    pub fn interpretation(&self) -> &str {
        &self.interpretation
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn recommendation(&self) -> Option<&str> {
        self.recommendation.as_deref()
    }
}
