use chrono::NaiveDate;
use schoolbook_core::db::open_db_in_memory;
use schoolbook_core::{
    RepoError, SqliteStudentRepository, Student, StudentEdits, StudentRepository, UpdateOutcome,
};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    let mut student = Student::new("S001", "Alice Brown");
    student.email = Some("alice@school.com".to_string());
    student.grade = Some("10th Grade".to_string());
    student.enrollment_date = NaiveDate::from_ymd_opt(2023, 9, 1).unwrap();
    repo.create(&student).unwrap();

    let loaded = repo.get("S001").unwrap().unwrap();
    assert_eq!(loaded, student);
    assert!(repo.exists("S001").unwrap());
}

#[test]
fn create_with_existing_key_fails_and_leaves_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    repo.create(&Student::new("S001", "Alice Brown")).unwrap();

    let mut intruder = Student::new("S001", "Someone Else");
    intruder.email = Some("other@school.com".to_string());
    let err = repo.create(&intruder).unwrap_err();
    assert!(matches!(
        err,
        RepoError::DuplicateKey { entity: "student", ref key } if key == "S001"
    ));

    let loaded = repo.get("S001").unwrap().unwrap();
    assert_eq!(loaded.name, "Alice Brown");
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn create_rejects_empty_required_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    let err = repo.create(&Student::new("S001", "   ")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn update_changes_only_named_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    let mut student = Student::new("S001", "Alice");
    student.grade = Some("10th Grade".to_string());
    repo.create(&student).unwrap();

    let edits = StudentEdits {
        email: Some("a@x.com".to_string()),
        ..StudentEdits::default()
    };
    let outcome = repo.update("S001", &edits).unwrap();
    assert_eq!(outcome, UpdateOutcome::Updated);

    let loaded = repo.get("S001").unwrap().unwrap();
    assert_eq!(loaded.name, "Alice");
    assert_eq!(loaded.email.as_deref(), Some("a@x.com"));
    assert_eq!(loaded.grade.as_deref(), Some("10th Grade"));
    assert_eq!(loaded.enrollment_date, student.enrollment_date);
}

#[test]
fn update_with_empty_edit_set_reports_no_changes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    let mut student = Student::new("S001", "Alice");
    student.email = Some("alice@school.com".to_string());
    repo.create(&student).unwrap();

    let edits = StudentEdits::default();
    assert!(edits.is_empty());
    let outcome = repo.update("S001", &edits).unwrap();
    assert_eq!(outcome, UpdateOutcome::NoChanges);

    let loaded = repo.get("S001").unwrap().unwrap();
    assert_eq!(loaded, student);
}

#[test]
fn update_with_identical_value_is_still_a_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    let mut student = Student::new("S001", "Alice");
    student.email = Some("a@x.com".to_string());
    repo.create(&student).unwrap();

    let edits = StudentEdits {
        email: Some("a@x.com".to_string()),
        ..StudentEdits::default()
    };
    assert_eq!(repo.update("S001", &edits).unwrap(), UpdateOutcome::Updated);
    assert_eq!(
        repo.get("S001").unwrap().unwrap().email.as_deref(),
        Some("a@x.com")
    );
}

#[test]
fn update_missing_student_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    let edits = StudentEdits {
        name: Some("Ghost".to_string()),
        ..StudentEdits::default()
    };
    let err = repo.update("S404", &edits).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { entity: "student", ref key } if key == "S404"
    ));
}

#[test]
fn delete_missing_student_returns_not_found_and_leaves_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    repo.create(&Student::new("S001", "Alice")).unwrap();

    let err = repo.delete("S404").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn list_is_ordered_by_id_and_empty_without_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::new(&conn);

    assert!(repo.list().unwrap().is_empty());

    repo.create(&Student::new("S003", "Charlie")).unwrap();
    repo.create(&Student::new("S001", "Alice")).unwrap();
    repo.create(&Student::new("S002", "Bob")).unwrap();

    let ids: Vec<String> = repo.list().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["S001", "S002", "S003"]);
}
