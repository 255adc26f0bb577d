//! Referential-integrity coordinator for parent deletions.
//!
//! # Responsibility
//! - Keep attendance consistent with its parent students and courses in the
//!   absence of store-level cascading deletes.
//!
//! # Invariants
//! - Child attendance rows are removed before the parent row, through the
//!   attendance repository's bulk deletes.
//! - Both steps run inside one immediate transaction, so no intermediate
//!   state (children gone, parent present) is ever visible and a failed
//!   parent delete rolls the children back.
//! - A missing parent reports `NotFound` without touching attendance.

use crate::repo::attendance_repo::{AttendanceRepository, SqliteAttendanceRepository};
use crate::repo::{key_exists, RepoError, RepoResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

/// Deletes one student together with all attendance rows referencing it.
pub fn delete_student(conn: &mut Connection, id: &str) -> RepoResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    if !key_exists(&tx, "students", "id", id)? {
        return Err(RepoError::NotFound {
            entity: "student",
            key: id.to_string(),
        });
    }

    let removed = SqliteAttendanceRepository::new(&tx).delete_for_student(id)?;
    tx.execute("DELETE FROM students WHERE id = ?1;", [id])?;
    tx.commit()?;

    info!(
        "event=cascade_delete module=integrity status=ok entity=student key={id} \
         attendance_removed={removed}"
    );
    Ok(())
}

/// Deletes one course together with all attendance rows referencing it.
pub fn delete_course(conn: &mut Connection, code: &str) -> RepoResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    if !key_exists(&tx, "courses", "code", code)? {
        return Err(RepoError::NotFound {
            entity: "course",
            key: code.to_string(),
        });
    }

    let removed = SqliteAttendanceRepository::new(&tx).delete_for_course(code)?;
    tx.execute("DELETE FROM courses WHERE code = ?1;", [code])?;
    tx.commit()?;

    info!(
        "event=cascade_delete module=integrity status=ok entity=course key={code} \
         attendance_removed={removed}"
    );
    Ok(())
}
