//! Primitive constraints shared by every entity.
//!
//! Each constraint is a small value attached to a field read. Checking it
//! yields either nothing or a `(Rule, message)` pair; the reader turns the
//! pair into a located violation.

use std::fmt::Display;

use super::violation::Rule;

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: Copy + PartialOrd + Display> Bounds<T> {
    /// No bounds at all.
    pub fn any() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub fn at_least(min: T) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn between(min: T, max: T) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn check(&self, value: T) -> Option<(Rule, String)> {
        if let Some(min) = self.min {
            if value < min {
                return Some((
                    Rule::Minimum,
                    format!("must be greater than or equal to {}", min),
                ));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Some((Rule::Maximum, format!("must be less than or equal to {}", max)));
            }
        }
        None
    }
}

/// Inclusive string length bounds, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    pub min: usize,
    pub max: Option<usize>,
}

impl Length {
    pub const fn any() -> Self {
        Self { min: 0, max: None }
    }

    pub const fn at_most(max: usize) -> Self {
        Self {
            min: 0,
            max: Some(max),
        }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub fn check(&self, value: &str) -> Option<(Rule, String)> {
        let len = value.chars().count();
        if len < self.min {
            let unit = if self.min == 1 { "character" } else { "characters" };
            return Some((
                Rule::MinLength,
                format!("must have at least {} {}", self.min, unit),
            ));
        }
        match self.max {
            Some(max) if len > max => Some((
                Rule::MaxLength,
                format!("must have at most {} characters", max),
            )),
            _ => None,
        }
    }
}

/// Per-item length bounds for a list of strings.
///
/// Lists carrying item bounds must also hold at least one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLength {
    pub min: usize,
    pub max: usize,
    /// Reported for any item outside `[min, max]`.
    pub message: &'static str,
}

impl ItemLength {
    pub const fn new(min: usize, max: usize, message: &'static str) -> Self {
        Self { min, max, message }
    }

    pub fn check(&self, item: &str) -> Option<(Rule, String)> {
        let len = item.chars().count();
        if len < self.min || len > self.max {
            Some((Rule::ItemLength, self.message.to_string()))
        } else {
            None
        }
    }
}
