//! Course record.

use crate::model::{require_non_empty, ValidationError};
use serde::{Deserialize, Serialize};

/// A course offered by the institution, keyed by its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Caller-assigned primary key, e.g. `MATH101`.
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl Course {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("code", &self.code)?;
        require_non_empty("name", &self.name)?;
        Ok(())
    }
}
