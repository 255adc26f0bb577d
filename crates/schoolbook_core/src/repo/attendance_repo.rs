//! Attendance repository contract and SQLite implementation.
//!
//! # Invariants
//! - `mark` refuses to create a row referencing a missing student or course;
//!   orphaned creation is never permitted.
//! - Rows are append-only: no single-row update or delete is exposed. Bulk
//!   deletes exist solely for the integrity coordinator's cascade.

use crate::model::attendance::{AttendanceEntry, AttendanceRecord, AttendanceWithNames};
use crate::repo::{key_exists, parse_date_column, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

/// Repository interface for attendance records.
pub trait AttendanceRepository {
    /// Persists one attendance entry and returns the store-assigned row id.
    fn mark(&self, entry: &AttendanceEntry) -> RepoResult<i64>;
    /// Lists all rows in ascending id order.
    fn list(&self) -> RepoResult<Vec<AttendanceRecord>>;
    /// Lists rows joined with student and course names, most recent first.
    fn list_with_names(&self) -> RepoResult<Vec<AttendanceWithNames>>;
    /// Removes all rows for one student; returns the number removed.
    fn delete_for_student(&self, student_id: &str) -> RepoResult<usize>;
    /// Removes all rows for one course; returns the number removed.
    fn delete_for_course(&self, course_code: &str) -> RepoResult<usize>;
}

/// SQLite-backed attendance repository.
pub struct SqliteAttendanceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAttendanceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AttendanceRepository for SqliteAttendanceRepository<'_> {
    fn mark(&self, entry: &AttendanceEntry) -> RepoResult<i64> {
        entry.validate()?;

        if !key_exists(self.conn, "students", "id", &entry.student_id)? {
            return Err(RepoError::NotFound {
                entity: "student",
                key: entry.student_id.clone(),
            });
        }
        if !key_exists(self.conn, "courses", "code", &entry.course_code)? {
            return Err(RepoError::NotFound {
                entity: "course",
                key: entry.course_code.clone(),
            });
        }

        self.conn.execute(
            "INSERT INTO attendance (student_id, course_code, date, is_present)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                entry.student_id,
                entry.course_code,
                entry.date.to_string(),
                i64::from(entry.is_present),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list(&self) -> RepoResult<Vec<AttendanceRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, student_id, course_code, date, is_present
             FROM attendance
             ORDER BY id ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_attendance_row(row)?);
        }

        Ok(records)
    }

    fn list_with_names(&self) -> RepoResult<Vec<AttendanceWithNames>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                a.id,
                a.student_id,
                s.name AS student_name,
                a.course_code,
                c.name AS course_name,
                a.date,
                a.is_present
             FROM attendance a
             INNER JOIN students s ON s.id = a.student_id
             INNER JOIN courses c ON c.code = a.course_code
             ORDER BY a.date DESC, a.student_id ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let date_text: String = row.get("date")?;
            records.push(AttendanceWithNames {
                id: row.get("id")?,
                student_id: row.get("student_id")?,
                student_name: row.get("student_name")?,
                course_code: row.get("course_code")?,
                course_name: row.get("course_name")?,
                date: parse_date_column(&date_text, "attendance.date")?,
                is_present: parse_is_present(row.get("is_present")?)?,
            });
        }

        Ok(records)
    }

    fn delete_for_student(&self, student_id: &str) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM attendance WHERE student_id = ?1;",
            [student_id],
        )?;
        Ok(removed)
    }

    fn delete_for_course(&self, course_code: &str) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM attendance WHERE course_code = ?1;",
            [course_code],
        )?;
        Ok(removed)
    }
}

fn parse_attendance_row(row: &Row<'_>) -> RepoResult<AttendanceRecord> {
    let date_text: String = row.get("date")?;
    Ok(AttendanceRecord {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        course_code: row.get("course_code")?,
        date: parse_date_column(&date_text, "attendance.date")?,
        is_present: parse_is_present(row.get("is_present")?)?,
    })
}

fn parse_is_present(value: i64) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid is_present value `{other}` in attendance.is_present"
        ))),
    }
}
