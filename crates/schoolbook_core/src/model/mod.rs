//! Domain model for school records.
//!
//! # Responsibility
//! - Define the canonical record shapes for students, teachers, courses and
//!   attendance.
//! - Own field-level validation applied before any write reaches storage.
//!
//! # Invariants
//! - Every record is identified by a caller-assigned primary key, except
//!   attendance rows whose ids are assigned by the store.
//! - Write paths must call `validate()` before persistence.

pub mod attendance;
pub mod course;
pub mod student;
pub mod teacher;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-level validation failure raised before a record reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField(&'static str),
    /// Salary must be a finite, non-negative amount.
    InvalidSalary(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "required field `{field}` is empty"),
            Self::InvalidSalary(value) => {
                write!(f, "salary must be a non-negative amount, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn require_valid_salary(salary: f64) -> Result<(), ValidationError> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(ValidationError::InvalidSalary(salary.to_string()));
    }
    Ok(())
}
