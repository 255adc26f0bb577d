//! Aggregate reporting over current record state.
//!
//! # Responsibility
//! - Compute read-only summaries (counts, sums, rates) per entity.
//!
//! # Invariants
//! - Nothing is cached; every report recomputes from current store state.
//! - Zero-row aggregates are valid results, never errors. The attendance
//!   rate is defined as 0 when no records exist.

use crate::model::course::Course;
use crate::model::student::Student;
use crate::model::teacher::Teacher;
use crate::repo::course_repo::{CourseRepository, SqliteCourseRepository};
use crate::repo::student_repo::{SqliteStudentRepository, StudentRepository};
use crate::repo::teacher_repo::{SqliteTeacherRepository, TeacherRepository};
use crate::repo::RepoResult;
use rusqlite::Connection;
use serde::Serialize;

/// Full student listing plus total count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentReport {
    pub students: Vec<Student>,
    pub total: u64,
}

/// Full teacher listing plus total count and salary expenditure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeacherReport {
    pub teachers: Vec<Teacher>,
    pub total: u64,
    pub salary_total: f64,
}

/// Full course listing plus total count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseReport {
    pub courses: Vec<Course>,
    pub total: u64,
}

/// Attendance tallies and the derived attendance rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttendanceReport {
    pub total: u64,
    pub present: u64,
    pub absent: u64,
    /// `present / total * 100`, or 0 when no records exist.
    pub rate_percent: f64,
}

pub fn student_report(conn: &Connection) -> RepoResult<StudentReport> {
    let students = SqliteStudentRepository::new(conn).list()?;
    let total = students.len() as u64;
    Ok(StudentReport { students, total })
}

pub fn teacher_report(conn: &Connection) -> RepoResult<TeacherReport> {
    let teachers = SqliteTeacherRepository::new(conn).list()?;
    let total = teachers.len() as u64;

    // TOTAL() yields 0.0 over an empty table or all-NULL salaries, where
    // SUM() would yield NULL.
    let salary_total: f64 =
        conn.query_row("SELECT TOTAL(salary) FROM teachers;", [], |row| row.get(0))?;

    Ok(TeacherReport {
        teachers,
        total,
        salary_total,
    })
}

pub fn course_report(conn: &Connection) -> RepoResult<CourseReport> {
    let courses = SqliteCourseRepository::new(conn).list()?;
    let total = courses.len() as u64;
    Ok(CourseReport { courses, total })
}

pub fn attendance_report(conn: &Connection) -> RepoResult<AttendanceReport> {
    let (total, present): (u64, u64) = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(is_present), 0) FROM attendance;",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let rate_percent = if total == 0 {
        0.0
    } else {
        present as f64 / total as f64 * 100.0
    };

    Ok(AttendanceReport {
        total,
        present,
        absent: total - present,
        rate_percent,
    })
}
