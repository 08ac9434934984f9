//! Validation configuration.

use chrono::{DateTime, Utc};

/// How keys not declared by an entity are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFields {
    /// Extra keys are tolerated and dropped from the typed result.
    #[default]
    Ignore,
    /// Every extra key is reported as an `unknown_field` violation.
    Reject,
}

/// Options for one validation call.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Fixed "now" used for time-relative bounds (founding year).
    /// When unset, the wall clock is read once per validation call.
    pub now: Option<DateTime<Utc>>,

    /// Treatment of undeclared keys
    pub unknown_fields: UnknownFields,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the clock, e.g. for deterministic tests.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn with_unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Shorthand for `with_unknown_fields(UnknownFields::Reject)`.
    pub fn strict(self) -> Self {
        self.with_unknown_fields(UnknownFields::Reject)
    }

    /// Resolve the clock for a single call.
    pub(crate) fn resolve_now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}
