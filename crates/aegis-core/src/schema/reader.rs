//! Explicit per-entity parse step over raw JSON values.
//!
//! Every entity reads its fields through a [`Reader`], which records a
//! located violation for each broken constraint and keeps going, so a single
//! pass reports every problem in a document. A field read returns
//! `Err(Rejected)` only after its violation has been recorded.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::constraints::{Bounds, ItemLength, Length};
use super::options::{UnknownFields, ValidationOptions};
use super::violation::{FieldPath, Rule, Violation, Violations};
use crate::ValidationError;

/// Longest accepted URL.
const MAX_URL_LENGTH: usize = 2083;

/// Largest float that still denotes an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

lazy_static! {
    static ref HTTP_URL: Regex =
        Regex::new(r"^(?i)https?://[^\s/?#@:]+(:\d{1,5})?([/?#]\S*)?$").unwrap();
}

/// Marker for a field whose violation has already been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected;

/// Outcome of a single field or entity read.
pub type Checked<T> = Result<T, Rejected>;

/// A closed set of textual values.
pub trait Choice: Sized + Copy + 'static {
    /// Every accepted value, in declaration order.
    const ALL: &'static [Self];

    /// Canonical text of this value.
    fn as_str(self) -> &'static str;

    /// Resolve canonical text; anything else is `None`.
    fn parse(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.as_str() == text)
    }
}

/// A record type validated by construction.
pub trait Entity: Sized {
    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Every key this entity declares.
    const FIELDS: &'static [&'static str];

    /// Read fields and check invariants.
    fn read(r: &mut Reader<'_>) -> Checked<Self>;

    /// Wrap this entity's violations in the façade error.
    fn failure(violations: Violations) -> ValidationError {
        ValidationError::Entity(violations)
    }

    /// Construct from a raw value with default options.
    fn from_value(raw: &Value) -> Result<Self, Violations> {
        construct(raw, &ValidationOptions::default())
    }

    /// Construct from a raw value.
    fn from_value_with(raw: &Value, options: &ValidationOptions) -> Result<Self, Violations> {
        construct(raw, options)
    }

    /// Parse and construct from a JSON document.
    fn from_json(json: &str) -> Result<Self, ValidationError> {
        let raw: Value = serde_json::from_str(json)?;
        Self::from_value(&raw).map_err(Self::failure)
    }

    /// Parse and construct from a YAML document.
    fn from_yaml(yaml: &str) -> Result<Self, ValidationError> {
        let raw: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(&raw).map_err(Self::failure)
    }
}

/// Construct an entity from raw input, collecting every violation.
pub fn construct<T: Entity>(raw: &Value, options: &ValidationOptions) -> Result<T, Violations> {
    let mut ctx = Context::new(options);
    let outcome = ctx.read_entity::<T>(FieldPath::root(), raw);
    let violations = ctx.into_violations();

    match outcome {
        Ok(entity) if violations.is_empty() => Ok(entity),
        _ => Err(Violations::new(T::NAME, violations)),
    }
}

/// State shared by all readers of one validation call.
pub struct Context {
    now: DateTime<Utc>,
    unknown_fields: UnknownFields,
    violations: Vec<Violation>,
}

impl Context {
    pub fn new(options: &ValidationOptions) -> Self {
        Self {
            now: options.resolve_now(),
            unknown_fields: options.unknown_fields,
            violations: Vec::new(),
        }
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    fn record(&mut self, path: FieldPath, rule: Rule, message: impl Into<String>) -> Rejected {
        let violation = Violation::new(path, rule, message);
        tracing::trace!(field = %violation.path, rule = %violation.rule, "violation recorded");
        self.violations.push(violation);
        Rejected
    }

    /// Read a nested entity located at `path`.
    pub fn read_entity<T: Entity>(&mut self, path: FieldPath, value: &Value) -> Checked<T> {
        let Some(map) = value.as_object() else {
            return Err(self.record(path, Rule::InvalidType, "must be an object"));
        };

        if self.unknown_fields == UnknownFields::Reject {
            for key in map.keys() {
                if !T::FIELDS.iter().any(|field| *field == key.as_str()) {
                    self.record(
                        path.key(key.as_str()),
                        Rule::UnknownField,
                        format!("is not a field of {}", T::NAME),
                    );
                }
            }
        }

        let mut reader = Reader {
            map,
            path,
            ctx: self,
        };
        T::read(&mut reader)
    }

    fn parse_string(&mut self, path: FieldPath, value: &Value, length: Length) -> Checked<String> {
        let Some(text) = value.as_str() else {
            return Err(self.record(path, Rule::InvalidType, "must be a string"));
        };
        if let Some((rule, message)) = length.check(text) {
            return Err(self.record(path, rule, message));
        }
        Ok(text.to_string())
    }

    fn parse_number(&mut self, path: FieldPath, value: &Value, bounds: Bounds<f64>) -> Checked<f64> {
        let Some(number) = value.as_f64() else {
            return Err(self.record(path, Rule::InvalidType, "must be a number"));
        };
        if let Some((rule, message)) = bounds.check(number) {
            return Err(self.record(path, rule, message));
        }
        Ok(number)
    }

    fn parse_integer<T: TryFrom<i64>>(
        &mut self,
        path: FieldPath,
        value: &Value,
        bounds: Bounds<i64>,
    ) -> Checked<T> {
        let integer = match value {
            Value::Number(number) => number.as_i64().or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER)
                    .map(|f| f as i64)
            }),
            _ => None,
        };
        let Some(integer) = integer else {
            return Err(self.record(path, Rule::InvalidType, "must be an integer"));
        };
        if let Some((rule, message)) = bounds.check(integer) {
            return Err(self.record(path, rule, message));
        }
        match T::try_from(integer) {
            Ok(converted) => Ok(converted),
            Err(_) => Err(self.record(path, Rule::Maximum, "is out of range")),
        }
    }

    fn parse_bool(&mut self, path: FieldPath, value: &Value) -> Checked<bool> {
        match value.as_bool() {
            Some(flag) => Ok(flag),
            None => Err(self.record(path, Rule::InvalidType, "must be a boolean")),
        }
    }

    fn parse_choice<C: Choice>(&mut self, path: FieldPath, value: &Value) -> Checked<C> {
        let Some(text) = value.as_str() else {
            return Err(self.record(path, Rule::InvalidType, "must be a string"));
        };
        match C::parse(text) {
            Some(choice) => Ok(choice),
            None => {
                let expected = C::ALL
                    .iter()
                    .map(|choice| format!("'{}'", choice.as_str()))
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(self.record(path, Rule::InvalidEnum, format!("must be one of {}", expected)))
            }
        }
    }

    fn parse_datetime(&mut self, path: FieldPath, value: &Value) -> Checked<DateTime<Utc>> {
        let Some(text) = value.as_str() else {
            return Err(self.record(path, Rule::InvalidType, "must be a datetime string"));
        };
        match parse_timestamp(text) {
            Some(timestamp) => Ok(timestamp),
            None => Err(self.record(path, Rule::InvalidFormat, "must be an RFC 3339 datetime")),
        }
    }

    fn parse_uuid(&mut self, path: FieldPath, value: &Value) -> Checked<Uuid> {
        let Some(text) = value.as_str() else {
            return Err(self.record(path, Rule::InvalidType, "must be a string"));
        };
        match Uuid::parse_str(text) {
            Ok(id) => Ok(id),
            Err(_) => Err(self.record(path, Rule::InvalidFormat, "must be a valid UUID")),
        }
    }

    fn parse_url(&mut self, path: FieldPath, value: &Value) -> Checked<String> {
        let text = self.parse_string(path.clone(), value, Length::at_most(MAX_URL_LENGTH))?;
        if !HTTP_URL.is_match(&text) {
            return Err(self.record(path, Rule::InvalidFormat, "must be a valid HTTP(S) URL"));
        }
        Ok(text)
    }

    fn parse_list<T>(
        &mut self,
        path: FieldPath,
        value: &Value,
        mut item: impl FnMut(&mut Context, FieldPath, &Value) -> Checked<T>,
    ) -> Checked<Vec<T>> {
        let Some(values) = value.as_array() else {
            return Err(self.record(path, Rule::InvalidType, "must be a list"));
        };

        let mut items = Vec::with_capacity(values.len());
        let mut rejected = false;
        for (index, value) in values.iter().enumerate() {
            match item(&mut *self, path.index(index), value) {
                Ok(parsed) => items.push(parsed),
                Err(Rejected) => rejected = true,
            }
        }

        if rejected {
            Err(Rejected)
        } else {
            Ok(items)
        }
    }

    fn parse_bounded_strings(
        &mut self,
        path: FieldPath,
        value: &Value,
        item: ItemLength,
    ) -> Checked<Vec<String>> {
        let items = self.parse_list(path.clone(), value, |ctx, item_path, item_value| {
            let text = ctx.parse_string(item_path.clone(), item_value, Length::any())?;
            if let Some((rule, message)) = item.check(&text) {
                return Err(ctx.record(item_path, rule, message));
            }
            Ok(text)
        })?;
        if items.is_empty() {
            return Err(self.record(path, Rule::MinItems, "must contain at least 1 item"));
        }
        Ok(items)
    }

    fn parse_entity_map<T: Entity>(
        &mut self,
        path: FieldPath,
        value: &Value,
    ) -> Checked<BTreeMap<String, T>> {
        let Some(entries) = value.as_object() else {
            return Err(self.record(path, Rule::InvalidType, "must be an object"));
        };

        let mut parsed = BTreeMap::new();
        let mut rejected = false;
        for (key, entry) in entries {
            match self.read_entity::<T>(path.key(key.as_str()), entry) {
                Ok(entity) => {
                    parsed.insert(key.clone(), entity);
                }
                Err(Rejected) => rejected = true,
            }
        }

        if rejected {
            Err(Rejected)
        } else {
            Ok(parsed)
        }
    }
}

/// Parse RFC 3339, or a naive ISO 8601 timestamp taken as UTC.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Field reader over one raw object.
pub struct Reader<'a> {
    map: &'a Map<String, Value>,
    path: FieldPath,
    ctx: &'a mut Context,
}

impl<'a> Reader<'a> {
    /// Location of the object being read.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// The clock for this validation call.
    pub fn now(&self) -> DateTime<Utc> {
        self.ctx.now
    }

    /// Record a violation against one field of this object.
    pub fn reject(&mut self, key: &str, rule: Rule, message: impl Into<String>) -> Rejected {
        let path = self.path.key(key);
        self.ctx.record(path, rule, message)
    }

    /// Record a violation against the object as a whole.
    pub fn reject_here(&mut self, rule: Rule, message: impl Into<String>) -> Rejected {
        let path = self.path.clone();
        self.ctx.record(path, rule, message)
    }

    fn required(&mut self, key: &str) -> Checked<&'a Value> {
        let map = self.map;
        match map.get(key) {
            None => Err(self.reject(key, Rule::Missing, "field required")),
            Some(Value::Null) => Err(self.reject(key, Rule::InvalidType, "must not be null")),
            Some(value) => Ok(value),
        }
    }

    fn optional(&self, key: &str) -> Option<&'a Value> {
        let map = self.map;
        map.get(key).filter(|value| !value.is_null())
    }

    fn req<T>(
        &mut self,
        key: &str,
        parse: impl FnOnce(&mut Context, FieldPath, &'a Value) -> Checked<T>,
    ) -> Checked<T> {
        let value = self.required(key)?;
        let path = self.path.key(key);
        parse(&mut *self.ctx, path, value)
    }

    fn opt<T>(
        &mut self,
        key: &str,
        parse: impl FnOnce(&mut Context, FieldPath, &'a Value) -> Checked<T>,
    ) -> Checked<Option<T>> {
        match self.optional(key) {
            None => Ok(None),
            Some(value) => {
                let path = self.path.key(key);
                parse(&mut *self.ctx, path, value).map(Some)
            }
        }
    }

    pub fn string(&mut self, key: &str, length: Length) -> Checked<String> {
        self.req(key, |ctx, path, value| ctx.parse_string(path, value, length))
    }

    pub fn opt_string(&mut self, key: &str, length: Length) -> Checked<Option<String>> {
        self.opt(key, |ctx, path, value| ctx.parse_string(path, value, length))
    }

    pub fn number(&mut self, key: &str, bounds: Bounds<f64>) -> Checked<f64> {
        self.req(key, |ctx, path, value| ctx.parse_number(path, value, bounds))
    }

    pub fn opt_number(&mut self, key: &str, bounds: Bounds<f64>) -> Checked<Option<f64>> {
        self.opt(key, |ctx, path, value| ctx.parse_number(path, value, bounds))
    }

    /// Number with a default applied when the key is absent.
    pub fn number_or(&mut self, key: &str, default: f64, bounds: Bounds<f64>) -> Checked<f64> {
        Ok(self.opt_number(key, bounds)?.unwrap_or(default))
    }

    pub fn integer<T: TryFrom<i64>>(&mut self, key: &str, bounds: Bounds<i64>) -> Checked<T> {
        self.req(key, |ctx, path, value| ctx.parse_integer(path, value, bounds))
    }

    pub fn opt_integer<T: TryFrom<i64>>(
        &mut self,
        key: &str,
        bounds: Bounds<i64>,
    ) -> Checked<Option<T>> {
        self.opt(key, |ctx, path, value| ctx.parse_integer(path, value, bounds))
    }

    pub fn opt_bool(&mut self, key: &str) -> Checked<Option<bool>> {
        self.opt(key, |ctx, path, value| ctx.parse_bool(path, value))
    }

    pub fn choice<C: Choice>(&mut self, key: &str) -> Checked<C> {
        self.req(key, |ctx, path, value| ctx.parse_choice(path, value))
    }

    pub fn opt_choice<C: Choice>(&mut self, key: &str) -> Checked<Option<C>> {
        self.opt(key, |ctx, path, value| ctx.parse_choice(path, value))
    }

    pub fn datetime(&mut self, key: &str) -> Checked<DateTime<Utc>> {
        self.req(key, |ctx, path, value| ctx.parse_datetime(path, value))
    }

    pub fn opt_datetime(&mut self, key: &str) -> Checked<Option<DateTime<Utc>>> {
        self.opt(key, |ctx, path, value| ctx.parse_datetime(path, value))
    }

    pub fn uuid(&mut self, key: &str) -> Checked<Uuid> {
        self.req(key, |ctx, path, value| ctx.parse_uuid(path, value))
    }

    pub fn opt_url(&mut self, key: &str) -> Checked<Option<String>> {
        self.opt(key, |ctx, path, value| ctx.parse_url(path, value))
    }

    /// List of unconstrained strings.
    pub fn strings(&mut self, key: &str) -> Checked<Vec<String>> {
        self.req(key, |ctx, path, value| {
            ctx.parse_list(path, value, |ctx, item_path, item| {
                ctx.parse_string(item_path, item, Length::any())
            })
        })
    }

    pub fn opt_strings(&mut self, key: &str) -> Checked<Option<Vec<String>>> {
        self.opt(key, |ctx, path, value| {
            ctx.parse_list(path, value, |ctx, item_path, item| {
                ctx.parse_string(item_path, item, Length::any())
            })
        })
    }

    /// Non-empty list of strings, each within `item` bounds.
    pub fn bounded_strings(&mut self, key: &str, item: ItemLength) -> Checked<Vec<String>> {
        self.req(key, |ctx, path, value| ctx.parse_bounded_strings(path, value, item))
    }

    /// Optional list of numbers; items outside `bounds` report `message`.
    pub fn opt_numbers(
        &mut self,
        key: &str,
        bounds: Bounds<f64>,
        message: &'static str,
    ) -> Checked<Option<Vec<f64>>> {
        self.opt(key, |ctx, path, value| {
            ctx.parse_list(path, value, |ctx, item_path, item| {
                let number = ctx.parse_number(item_path.clone(), item, Bounds::any())?;
                if let Some((rule, _)) = bounds.check(number) {
                    return Err(ctx.record(item_path, rule, message));
                }
                Ok(number)
            })
        })
    }

    pub fn entity<T: Entity>(&mut self, key: &str) -> Checked<T> {
        self.req(key, |ctx, path, value| ctx.read_entity(path, value))
    }

    pub fn opt_entity<T: Entity>(&mut self, key: &str) -> Checked<Option<T>> {
        self.opt(key, |ctx, path, value| ctx.read_entity(path, value))
    }

    pub fn entities<T: Entity>(&mut self, key: &str) -> Checked<Vec<T>> {
        self.req(key, |ctx, path, value| {
            ctx.parse_list(path, value, |ctx, item_path, item| {
                ctx.read_entity(item_path, item)
            })
        })
    }

    /// Map of name to nested entity.
    pub fn entity_map<T: Entity>(&mut self, key: &str) -> Checked<BTreeMap<String, T>> {
        self.req(key, |ctx, path, value| ctx.parse_entity_map(path, value))
    }
}
