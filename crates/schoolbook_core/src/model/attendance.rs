//! Attendance records.
//!
//! # Invariants
//! - Row ids are store-assigned, monotonically increasing, and never reused.
//! - Every row references an existing student and course at creation time.
//! - Rows are created once and never updated; they are removed only as a
//!   side effect of deleting their parent student or course.

use crate::model::{require_non_empty, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Input for marking attendance; the row id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub student_id: String,
    pub course_code: String,
    pub date: NaiveDate,
    pub is_present: bool,
}

impl AttendanceEntry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("student_id", &self.student_id)?;
        require_non_empty("course_code", &self.course_code)?;
        Ok(())
    }
}

/// A persisted attendance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: String,
    pub course_code: String,
    pub date: NaiveDate,
    pub is_present: bool,
}

/// Attendance row joined with its parent names, for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceWithNames {
    pub id: i64,
    pub student_id: String,
    pub student_name: String,
    pub course_code: String,
    pub course_name: String,
    pub date: NaiveDate,
    pub is_present: bool,
}
