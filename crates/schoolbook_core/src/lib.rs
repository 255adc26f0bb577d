//! Core record management logic for Schoolbook.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::attendance::{AttendanceEntry, AttendanceRecord, AttendanceWithNames};
pub use model::course::Course;
pub use model::student::Student;
pub use model::teacher::Teacher;
pub use model::ValidationError;
pub use repo::attendance_repo::{AttendanceRepository, SqliteAttendanceRepository};
pub use repo::course_repo::{CourseEdits, CourseRepository, SqliteCourseRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentEdits, StudentRepository};
pub use repo::teacher_repo::{SqliteTeacherRepository, TeacherEdits, TeacherRepository};
pub use repo::{RepoError, RepoResult, UpdateOutcome};
pub use service::reports::{
    attendance_report, course_report, student_report, teacher_report, AttendanceReport,
    CourseReport, StudentReport, TeacherReport,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
