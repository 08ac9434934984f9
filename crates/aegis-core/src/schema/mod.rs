//! Schema machinery: violations, primitive constraints and the field reader.
//!
//! Entities are validated by construction. Each entity reads its own fields
//! through a [`Reader`]; field constraints are explicit values
//! ([`Bounds`], [`Length`], [`ItemLength`]) evaluated eagerly, and every
//! failure is recorded as a [`Violation`] instead of aborting the read.

mod constraints;
mod json_schema;
mod options;
mod reader;
mod violation;

pub use constraints::{Bounds, ItemLength, Length};
pub use json_schema::{
    check_deal_memo_schema, deal_memo_schema, is_valid_deal_memo, SchemaError, DEAL_MEMO_SCHEMA_JSON,
};
pub use options::{UnknownFields, ValidationOptions};
pub use reader::{construct, Checked, Choice, Context, Entity, Reader, Rejected};
pub use violation::{FieldPath, Invariant, Rule, Segment, Violation, Violations};
