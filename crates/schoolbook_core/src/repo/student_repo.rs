//! Student repository contract and SQLite implementation.
//!
//! # Invariants
//! - `id` is immutable; no edit set can address it.
//! - `list` returns rows in ascending id order.

use crate::model::student::Student;
use crate::model::{require_non_empty, ValidationError};
use crate::repo::edits::FieldEdits;
use crate::repo::{key_exists, parse_date_column, RepoError, RepoResult, UpdateOutcome};
use rusqlite::{params, params_from_iter, Connection, Row};

const ENTITY: &str = "student";

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    grade,
    enrollment_date
FROM students";

/// Sparse edit set for a student; `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentEdits {
    pub name: Option<String>,
    pub email: Option<String>,
    pub grade: Option<String>,
}

impl StudentEdits {
    /// `true` when no field is set; `update` reports `NoChanges` for such sets.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.grade.is_none()
    }

    fn to_field_edits(&self) -> Result<FieldEdits, ValidationError> {
        let mut fields = FieldEdits::new();
        if let Some(name) = self.name.as_deref() {
            require_non_empty("name", name)?;
            fields.set_text("name", name);
        }
        if let Some(email) = self.email.as_deref() {
            fields.set_text("email", email);
        }
        if let Some(grade) = self.grade.as_deref() {
            fields.set_text("grade", grade);
        }
        Ok(fields)
    }
}

/// Repository interface for student records.
pub trait StudentRepository {
    fn exists(&self, id: &str) -> RepoResult<bool>;
    /// Persists one student. Fails with `DuplicateKey` when the id exists.
    fn create(&self, student: &Student) -> RepoResult<()>;
    fn get(&self, id: &str) -> RepoResult<Option<Student>>;
    /// Lists all students in ascending id order; empty when no rows exist.
    fn list(&self) -> RepoResult<Vec<Student>>;
    /// Applies a sparse edit set as one atomic write.
    fn update(&self, id: &str, edits: &StudentEdits) -> RepoResult<UpdateOutcome>;
    /// Removes one student row. Dependent attendance rows are the integrity
    /// coordinator's concern, not this repository's.
    fn delete(&self, id: &str) -> RepoResult<()>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn exists(&self, id: &str) -> RepoResult<bool> {
        key_exists(self.conn, "students", "id", id)
    }

    fn create(&self, student: &Student) -> RepoResult<()> {
        student.validate()?;

        if self.exists(&student.id)? {
            return Err(RepoError::DuplicateKey {
                entity: ENTITY,
                key: student.id.clone(),
            });
        }

        self.conn.execute(
            "INSERT INTO students (id, name, email, grade, enrollment_date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                student.id,
                student.name,
                student.email.as_deref(),
                student.grade.as_deref(),
                student.enrollment_date.to_string(),
            ],
        )?;

        Ok(())
    }

    fn get(&self, id: &str) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn update(&self, id: &str, edits: &StudentEdits) -> RepoResult<UpdateOutcome> {
        if !self.exists(id)? {
            return Err(RepoError::NotFound {
                entity: ENTITY,
                key: id.to_string(),
            });
        }

        if edits.is_empty() {
            return Ok(UpdateOutcome::NoChanges);
        }

        let fields = edits.to_field_edits()?;
        let (sql, bind_values) = fields.render_update("students", "id", id);
        self.conn.execute(&sql, params_from_iter(bind_values))?;

        Ok(UpdateOutcome::Updated)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: ENTITY,
                key: id.to_string(),
            });
        }

        Ok(())
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let date_text: String = row.get("enrollment_date")?;
    Ok(Student {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        grade: row.get("grade")?,
        enrollment_date: parse_date_column(&date_text, "students.enrollment_date")?,
    })
}
