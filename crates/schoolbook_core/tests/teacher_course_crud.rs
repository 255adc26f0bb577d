use schoolbook_core::db::open_db_in_memory;
use schoolbook_core::{
    Course, CourseEdits, CourseRepository, RepoError, SqliteCourseRepository,
    SqliteTeacherRepository, Teacher, TeacherEdits, TeacherRepository, UpdateOutcome,
};

#[test]
fn teacher_create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeacherRepository::new(&conn);

    let mut teacher = Teacher::new("T001", "John Smith");
    teacher.email = Some("jsmith@school.com".to_string());
    teacher.department = Some("Mathematics".to_string());
    teacher.salary = Some(50000.0);
    repo.create(&teacher).unwrap();

    let loaded = repo.get("T001").unwrap().unwrap();
    assert_eq!(loaded, teacher);
}

#[test]
fn teacher_duplicate_key_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeacherRepository::new(&conn);

    repo.create(&Teacher::new("T001", "John Smith")).unwrap();
    let err = repo.create(&Teacher::new("T001", "Jane Doe")).unwrap_err();
    assert!(matches!(
        err,
        RepoError::DuplicateKey { entity: "teacher", ref key } if key == "T001"
    ));
}

#[test]
fn negative_salary_is_rejected_on_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeacherRepository::new(&conn);

    let mut teacher = Teacher::new("T001", "John Smith");
    teacher.salary = Some(-1.0);
    let err = repo.create(&teacher).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(!repo.exists("T001").unwrap());

    teacher.salary = Some(50000.0);
    repo.create(&teacher).unwrap();

    let edits = TeacherEdits {
        salary: Some(-200.0),
        ..TeacherEdits::default()
    };
    let err = repo.update("T001", &edits).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let loaded = repo.get("T001").unwrap().unwrap();
    assert_eq!(loaded.salary, Some(50000.0));
}

#[test]
fn teacher_partial_update_keeps_absent_salary_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeacherRepository::new(&conn);

    let mut teacher = Teacher::new("T001", "John Smith");
    teacher.salary = Some(50000.0);
    repo.create(&teacher).unwrap();

    let edits = TeacherEdits {
        department: Some("Science".to_string()),
        ..TeacherEdits::default()
    };
    assert_eq!(repo.update("T001", &edits).unwrap(), UpdateOutcome::Updated);

    let loaded = repo.get("T001").unwrap().unwrap();
    assert_eq!(loaded.department.as_deref(), Some("Science"));
    assert_eq!(loaded.salary, Some(50000.0));
    assert_eq!(loaded.name, "John Smith");
}

#[test]
fn teacher_empty_edit_set_reports_no_changes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeacherRepository::new(&conn);

    repo.create(&Teacher::new("T001", "John Smith")).unwrap();

    let edits = TeacherEdits::default();
    assert!(edits.is_empty());
    assert_eq!(
        repo.update("T001", &edits).unwrap(),
        UpdateOutcome::NoChanges
    );
}

#[test]
fn teacher_delete_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTeacherRepository::new(&conn);

    repo.create(&Teacher::new("T001", "John Smith")).unwrap();
    repo.delete("T001").unwrap();
    assert!(repo.get("T001").unwrap().is_none());

    let err = repo.delete("T001").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn course_crud_roundtrip_and_ordering() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::new(&conn);

    let mut math = Course::new("MATH101", "Mathematics");
    math.description = Some("Basic Mathematics".to_string());
    repo.create(&math).unwrap();
    repo.create(&Course::new("ENG201", "English")).unwrap();

    let loaded = repo.get("MATH101").unwrap().unwrap();
    assert_eq!(loaded, math);

    let codes: Vec<String> = repo.list().unwrap().into_iter().map(|c| c.code).collect();
    assert_eq!(codes, vec!["ENG201", "MATH101"]);
}

#[test]
fn course_duplicate_and_not_found_errors() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::new(&conn);

    repo.create(&Course::new("MATH101", "Mathematics")).unwrap();
    let err = repo
        .create(&Course::new("MATH101", "Maths Again"))
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateKey { entity: "course", .. }));

    let err = repo
        .update(
            "SCI404",
            &CourseEdits {
                name: Some("Ghost Science".to_string()),
                ..CourseEdits::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "course", .. }));
}

#[test]
fn course_partial_update_changes_only_description() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCourseRepository::new(&conn);

    repo.create(&Course::new("MATH101", "Mathematics")).unwrap();

    let edits = CourseEdits {
        description: Some("Algebra and geometry".to_string()),
        ..CourseEdits::default()
    };
    assert_eq!(
        repo.update("MATH101", &edits).unwrap(),
        UpdateOutcome::Updated
    );

    let loaded = repo.get("MATH101").unwrap().unwrap();
    assert_eq!(loaded.name, "Mathematics");
    assert_eq!(loaded.description.as_deref(), Some("Algebra and geometry"));

    let empty = CourseEdits::default();
    assert!(empty.is_empty());
    assert_eq!(
        repo.update("MATH101", &empty).unwrap(),
        UpdateOutcome::NoChanges
    );
}
