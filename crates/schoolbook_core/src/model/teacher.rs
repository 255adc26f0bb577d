//! Teacher record.
//!
//! # Invariants
//! - `salary`, when present, is finite and non-negative.

use crate::model::{require_non_empty, require_valid_salary, ValidationError};
use serde::{Deserialize, Serialize};

/// A member of the teaching staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Caller-assigned primary key, e.g. `T001`.
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub salary: Option<f64>,
}

impl Teacher {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            department: None,
            salary: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("id", &self.id)?;
        require_non_empty("name", &self.name)?;
        if let Some(salary) = self.salary {
            require_valid_salary(salary)?;
        }
        Ok(())
    }
}
