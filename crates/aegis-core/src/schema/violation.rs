//! Violation records produced by entity construction.
//!
//! A violation names the offending field, the rule it broke and a
//! human-readable message. Violations are collected, never thrown: the
//! façade decides whether to surface them as an error or as a list.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a raw document.
///
/// Rendered as dotted keys with bracketed list indexes, e.g.
/// `aegis_deal_memo.growth_potential.key_drivers[2]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path to a named child of this path.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key.into()));
        Self(segments)
    }

    /// Path to a list element of this path.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Self(segments)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Named consistency rules spanning two or more fields of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Invariant {
    /// `MetricDistribution`: max >= min
    MaxAtLeastMin,
    /// `MetricDistribution`: min <= median <= max
    MedianWithinRange,
    /// `TimeRange`: end_date >= start_date
    EndAfterStart,
    /// `RevenueProjection`: year3 >= year1
    Year3AtLeastYear1,
    /// `RevenueProjection`: year5 >= year3
    Year5AtLeastYear3,
    /// `AnalysisWeightings`: the five weights sum to 100 (±0.01)
    WeightingsSum,
}

impl Invariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MaxAtLeastMin => "max_at_least_min",
            Self::MedianWithinRange => "median_within_range",
            Self::EndAfterStart => "end_after_start",
            Self::Year3AtLeastYear1 => "year3_at_least_year1",
            Self::Year5AtLeastYear3 => "year5_at_least_year3",
            Self::WeightingsSum => "weightings_sum",
        }
    }
}

/// The rule a violation broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Required field absent.
    Missing,
    /// Wrong JSON type (or null for a required field).
    InvalidType,
    /// Text outside a closed value set.
    InvalidEnum,
    /// Unparseable identifier, timestamp or URL.
    InvalidFormat,
    /// Number below its lower bound.
    Minimum,
    /// Number above its upper bound.
    Maximum,
    /// String shorter than allowed.
    MinLength,
    /// String longer than allowed.
    MaxLength,
    /// A list item's length outside its declared range.
    ItemLength,
    /// List with too few items.
    MinItems,
    /// Key not declared by the entity (only under `UnknownFields::Reject`).
    UnknownField,
    /// Cross-field invariant.
    Invariant(Invariant),
}

impl Rule {
    /// Stable identifier used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::InvalidType => "invalid_type",
            Self::InvalidEnum => "invalid_enum",
            Self::InvalidFormat => "invalid_format",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::ItemLength => "item_length",
            Self::MinItems => "min_items",
            Self::UnknownField => "unknown_field",
            Self::Invariant(invariant) => invariant.as_str(),
        }
    }

    /// Whether this rule spans several fields.
    pub const fn is_cross_field(self) -> bool {
        matches!(self, Self::Invariant(_))
    }

    /// Whether this rule concerns the shape of the input rather than a value.
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Self::Missing | Self::InvalidType | Self::InvalidEnum | Self::InvalidFormat | Self::UnknownField
        )
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single constraint failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub path: FieldPath,
    pub rule: Rule,
    pub message: String,
}

impl Violation {
    pub fn new(path: FieldPath, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            path,
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.path, self.message, self.rule)
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Violation", 3)?;
        state.serialize_field("field_path", &self.path)?;
        state.serialize_field("rule", &self.rule)?;
        state.serialize_field("msg", &self.message)?;
        state.end()
    }
}

/// Every violation found while constructing one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Violations {
    entity: &'static str,
    items: Vec<Violation>,
}

impl Violations {
    pub fn new(entity: &'static str, items: Vec<Violation>) -> Self {
        Self { entity, items }
    }

    /// Name of the entity whose construction failed.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any violation carries the given rule.
    pub fn has_rule(&self, rule: Rule) -> bool {
        self.items.iter().any(|v| v.rule == rule)
    }

    /// Whether any violation is located at the given rendered path.
    pub fn has_path(&self, path: &str) -> bool {
        self.items.iter().any(|v| v.path.to_string() == path)
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.items
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.items.len() == 1 {
            "violation"
        } else {
            "violations"
        };
        write!(f, "{} {} for {}", self.items.len(), noun, self.entity)?;
        for violation in &self.items {
            write!(f, "; {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
