//! Student record.
//!
//! # Invariants
//! - `id` is caller-assigned, unique, and immutable after creation.
//! - `enrollment_date` defaults to the current local date at creation.

use crate::model::{require_non_empty, ValidationError};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A student on the institution's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Caller-assigned primary key, e.g. `S001`.
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub grade: Option<String>,
    pub enrollment_date: NaiveDate,
}

impl Student {
    /// Creates a student enrolled today with optional fields unset.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            grade: None,
            enrollment_date: Local::now().date_naive(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("id", &self.id)?;
        require_non_empty("name", &self.name)?;
        Ok(())
    }
}
