//! Identity and timestamps shared by tracked entities.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::schema::{Checked, Reader};

/// Identity and timestamps of a tracked entity.
///
/// No ordering is enforced between `created_at` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tracked {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Tracked {
    /// Read the tracking fields of the object `r` points at.
    pub(crate) fn read(r: &mut Reader<'_>) -> Checked<Self> {
        let id = r.uuid("id");
        let created_at = r.datetime("created_at");
        let updated_at = r.datetime("updated_at");

        Ok(Self {
            id: id?,
            created_at: created_at?,
            updated_at: updated_at?,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
