//! Course repository contract and SQLite implementation.

use crate::model::course::Course;
use crate::model::{require_non_empty, ValidationError};
use crate::repo::edits::FieldEdits;
use crate::repo::{key_exists, RepoError, RepoResult, UpdateOutcome};
use rusqlite::{params, params_from_iter, Connection, Row};

const ENTITY: &str = "course";

const COURSE_SELECT_SQL: &str = "SELECT
    code,
    name,
    description
FROM courses";

/// Sparse edit set for a course; `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseEdits {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CourseEdits {
    /// `true` when no field is set; `update` reports `NoChanges` for such sets.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    fn to_field_edits(&self) -> Result<FieldEdits, ValidationError> {
        let mut fields = FieldEdits::new();
        if let Some(name) = self.name.as_deref() {
            require_non_empty("name", name)?;
            fields.set_text("name", name);
        }
        if let Some(description) = self.description.as_deref() {
            fields.set_text("description", description);
        }
        Ok(fields)
    }
}

/// Repository interface for course records.
pub trait CourseRepository {
    fn exists(&self, code: &str) -> RepoResult<bool>;
    fn create(&self, course: &Course) -> RepoResult<()>;
    fn get(&self, code: &str) -> RepoResult<Option<Course>>;
    fn list(&self) -> RepoResult<Vec<Course>>;
    fn update(&self, code: &str, edits: &CourseEdits) -> RepoResult<UpdateOutcome>;
    fn delete(&self, code: &str) -> RepoResult<()>;
}

/// SQLite-backed course repository.
pub struct SqliteCourseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCourseRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CourseRepository for SqliteCourseRepository<'_> {
    fn exists(&self, code: &str) -> RepoResult<bool> {
        key_exists(self.conn, "courses", "code", code)
    }

    fn create(&self, course: &Course) -> RepoResult<()> {
        course.validate()?;

        if self.exists(&course.code)? {
            return Err(RepoError::DuplicateKey {
                entity: ENTITY,
                key: course.code.clone(),
            });
        }

        self.conn.execute(
            "INSERT INTO courses (code, name, description) VALUES (?1, ?2, ?3);",
            params![course.code, course.name, course.description.as_deref()],
        )?;

        Ok(())
    }

    fn get(&self, code: &str) -> RepoResult<Option<Course>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COURSE_SELECT_SQL} WHERE code = ?1;"))?;

        let mut rows = stmt.query([code])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_course_row(row)?));
        }

        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Course>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COURSE_SELECT_SQL} ORDER BY code ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut courses = Vec::new();
        while let Some(row) = rows.next()? {
            courses.push(parse_course_row(row)?);
        }

        Ok(courses)
    }

    fn update(&self, code: &str, edits: &CourseEdits) -> RepoResult<UpdateOutcome> {
        if !self.exists(code)? {
            return Err(RepoError::NotFound {
                entity: ENTITY,
                key: code.to_string(),
            });
        }

        if edits.is_empty() {
            return Ok(UpdateOutcome::NoChanges);
        }

        let fields = edits.to_field_edits()?;
        let (sql, bind_values) = fields.render_update("courses", "code", code);
        self.conn.execute(&sql, params_from_iter(bind_values))?;

        Ok(UpdateOutcome::Updated)
    }

    fn delete(&self, code: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM courses WHERE code = ?1;", [code])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: ENTITY,
                key: code.to_string(),
            });
        }

        Ok(())
    }
}

fn parse_course_row(row: &Row<'_>) -> RepoResult<Course> {
    Ok(Course {
        code: row.get("code")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}
