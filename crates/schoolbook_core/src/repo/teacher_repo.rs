//! Teacher repository contract and SQLite implementation.
//!
//! # Invariants
//! - Salary edits are validated as non-negative before any SQL runs.
//! - `list` returns rows in ascending id order.

use crate::model::teacher::Teacher;
use crate::model::{require_non_empty, require_valid_salary, ValidationError};
use crate::repo::edits::FieldEdits;
use crate::repo::{key_exists, RepoError, RepoResult, UpdateOutcome};
use rusqlite::{params, params_from_iter, Connection, Row};

const ENTITY: &str = "teacher";

const TEACHER_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    department,
    salary
FROM teachers";

/// Sparse edit set for a teacher; `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeacherEdits {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub salary: Option<f64>,
}

impl TeacherEdits {
    /// `true` when no field is set; `update` reports `NoChanges` for such sets.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.department.is_none()
            && self.salary.is_none()
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
        if let Some(department) = self.department.as_deref() {
            fields.set_text("department", department);
        }
        if let Some(salary) = self.salary {
            require_valid_salary(salary)?;
            fields.set_real("salary", salary);
        }
        Ok(fields)
    }
}

/// Repository interface for teacher records.
pub trait TeacherRepository {
    fn exists(&self, id: &str) -> RepoResult<bool>;
    fn create(&self, teacher: &Teacher) -> RepoResult<()>;
    fn get(&self, id: &str) -> RepoResult<Option<Teacher>>;
    fn list(&self) -> RepoResult<Vec<Teacher>>;
    fn update(&self, id: &str, edits: &TeacherEdits) -> RepoResult<UpdateOutcome>;
    fn delete(&self, id: &str) -> RepoResult<()>;
}

/// SQLite-backed teacher repository.
pub struct SqliteTeacherRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTeacherRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TeacherRepository for SqliteTeacherRepository<'_> {
    fn exists(&self, id: &str) -> RepoResult<bool> {
        key_exists(self.conn, "teachers", "id", id)
    }

    fn create(&self, teacher: &Teacher) -> RepoResult<()> {
        teacher.validate()?;

        if self.exists(&teacher.id)? {
            return Err(RepoError::DuplicateKey {
                entity: ENTITY,
                key: teacher.id.clone(),
            });
        }

        self.conn.execute(
            "INSERT INTO teachers (id, name, email, department, salary)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                teacher.id,
                teacher.name,
                teacher.email.as_deref(),
                teacher.department.as_deref(),
                teacher.salary,
            ],
        )?;

        Ok(())
    }

    fn get(&self, id: &str) -> RepoResult<Option<Teacher>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEACHER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_teacher_row(row)?));
        }

        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Teacher>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEACHER_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut teachers = Vec::new();
        while let Some(row) = rows.next()? {
            teachers.push(parse_teacher_row(row)?);
        }

        Ok(teachers)
    }

    fn update(&self, id: &str, edits: &TeacherEdits) -> RepoResult<UpdateOutcome> {
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
        let (sql, bind_values) = fields.render_update("teachers", "id", id);
        self.conn.execute(&sql, params_from_iter(bind_values))?;

        Ok(UpdateOutcome::Updated)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM teachers WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: ENTITY,
                key: id.to_string(),
            });
        }

        Ok(())
    }
}

fn parse_teacher_row(row: &Row<'_>) -> RepoResult<Teacher> {
    let teacher = Teacher {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        department: row.get("department")?,
        salary: row.get("salary")?,
    };
    teacher.validate()?;
    Ok(teacher)
}
