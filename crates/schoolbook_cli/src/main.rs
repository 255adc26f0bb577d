//! Interactive console front-end for the record manager.
//!
//! # Responsibility
//! - Collect user intent and raw field values through a numbered menu.
//! - Translate "press Enter to keep current" input into sparse edit sets.
//! - Format records and reports for the terminal.
//!
//! All business rules live in `schoolbook_core`; this binary is I/O plumbing.

use chrono::{Local, NaiveDate};
use directories::BaseDirs;
use rusqlite::Connection;
use schoolbook_core::db::open_db;
use schoolbook_core::service::integrity;
use schoolbook_core::{
    attendance_report, course_report, default_log_level, init_logging, student_report,
    teacher_report, AttendanceEntry, AttendanceRepository, Course, CourseEdits, CourseRepository,
    SqliteAttendanceRepository, SqliteCourseRepository, SqliteStudentRepository,
    SqliteTeacherRepository, Student, StudentEdits, StudentRepository, Teacher, TeacherEdits,
    TeacherRepository,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const DATA_DIR_NAME: &str = ".schoolbook";
const DB_FILE_NAME: &str = "schoolbook.sqlite3";

fn main() -> ExitCode {
    let data_dir = match data_dir() {
        Ok(dir) => dir,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(message) = init_logging(default_log_level(), &data_dir.join("logs")) {
        eprintln!("warning: logging disabled: {message}");
    }

    let mut conn = match open_db(data_dir.join(DB_FILE_NAME)) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("Failed to open database: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = seed_sample_data(&conn) {
        eprintln!("Error initializing sample data: {err}");
    }

    println!("Connected to database at {}", data_dir.display());
    run(&mut conn);
    ExitCode::SUCCESS
}

fn data_dir() -> Result<PathBuf, String> {
    let base_dirs = BaseDirs::new().ok_or("could not locate home directory")?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Inserts a handful of sample records on first run so the menus have
/// something to show. Skipped as soon as any table has data.
fn seed_sample_data(conn: &Connection) -> schoolbook_core::RepoResult<()> {
    let students = SqliteStudentRepository::new(conn);
    let teachers = SqliteTeacherRepository::new(conn);
    let courses = SqliteCourseRepository::new(conn);

    if !students.list()?.is_empty() || !teachers.list()?.is_empty() || !courses.list()?.is_empty() {
        return Ok(());
    }

    let enrolled = |year, month, day| {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| Local::now().date_naive())
    };

    for (id, name, email, grade, date) in [
        ("S001", "Alice Brown", "alice@school.com", "10th Grade", enrolled(2023, 9, 1)),
        ("S002", "Bob Wilson", "bob@school.com", "10th Grade", enrolled(2023, 9, 1)),
        ("S003", "Charlie Davis", "charlie@school.com", "11th Grade", enrolled(2022, 9, 1)),
    ] {
        let mut student = Student::new(id, name);
        student.email = Some(email.to_string());
        student.grade = Some(grade.to_string());
        student.enrollment_date = date;
        students.create(&student)?;
    }

    for (id, name, email, department, salary) in [
        ("T001", "John Smith", "jsmith@school.com", "Mathematics", 50000.0),
        ("T002", "Jane Doe", "jdoe@school.com", "English", 48000.0),
        ("T003", "Robert Johnson", "rjohnson@school.com", "Science", 52000.0),
    ] {
        let mut teacher = Teacher::new(id, name);
        teacher.email = Some(email.to_string());
        teacher.department = Some(department.to_string());
        teacher.salary = Some(salary);
        teachers.create(&teacher)?;
    }

    for (code, name, description) in [
        ("MATH101", "Mathematics", "Basic Mathematics"),
        ("ENG201", "English", "Advanced English"),
        ("SCI301", "Science", "General Science"),
    ] {
        let mut course = Course::new(code, name);
        course.description = Some(description.to_string());
        courses.create(&course)?;
    }

    println!("Sample data added to database.");
    Ok(())
}

fn run(conn: &mut Connection) {
    loop {
        println!("\n=== School Management System ===");
        println!("1. Student Management");
        println!("2. Teacher Management");
        println!("3. Course Management");
        println!("4. Attendance Management");
        println!("5. Generate Reports");
        println!("6. Exit");

        let Some(choice) = prompt_number("Please select an option: ") else {
            return;
        };
        match choice {
            1 => student_menu(conn),
            2 => teacher_menu(conn),
            3 => course_menu(conn),
            4 => attendance_menu(conn),
            5 => reports_menu(conn),
            6 => {
                println!("Exiting system. Goodbye!");
                return;
            }
            _ => println!("Invalid option. Please try again."),
        }
    }
}

fn student_menu(conn: &mut Connection) {
    loop {
        println!("\n=== Student Management ===");
        println!("1. Add New Student");
        println!("2. View All Students");
        println!("3. Update Student Information");
        println!("4. Remove Student");
        println!("5. Back to Main Menu");

        let Some(choice) = prompt_number("Please select an option: ") else {
            return;
        };
        match choice {
            1 => report_outcome(add_student(conn), "Student added successfully!"),
            2 => print_students(conn),
            3 => update_student(conn),
            4 => report_outcome(
                integrity::delete_student(conn, &prompt("Enter Student ID to remove: ")),
                "Student removed successfully!",
            ),
            5 => return,
            _ => println!("Invalid option. Please try again."),
        }
    }
}

fn add_student(conn: &Connection) -> schoolbook_core::RepoResult<()> {
    let id = prompt("Enter Student ID: ");
    let name = prompt("Enter Student Name: ");
    let mut student = Student::new(id, name);
    student.email = prompt_optional("Enter Email (optional): ");
    student.grade = prompt_optional("Enter Grade (optional): ");
    SqliteStudentRepository::new(conn).create(&student)
}

fn update_student(conn: &Connection) {
    let repo = SqliteStudentRepository::new(conn);
    let id = prompt("Enter Student ID to update: ");

    let current = match repo.get(&id) {
        Ok(Some(student)) => student,
        Ok(None) => {
            println!("Student with ID {id} not found.");
            return;
        }
        Err(err) => {
            println!("Error: {err}");
            return;
        }
    };

    println!("Current Name: {}", current.name);
    println!("Current Email: {}", current.email.as_deref().unwrap_or("-"));
    println!("Current Grade: {}", current.grade.as_deref().unwrap_or("-"));

    let edits = StudentEdits {
        name: prompt_optional("Enter new Name (press Enter to keep current): "),
        email: prompt_optional("Enter new Email (press Enter to keep current): "),
        grade: prompt_optional("Enter new Grade (press Enter to keep current): "),
    };

    report_update(repo.update(&id, &edits), "Student information updated successfully!");
}

fn print_students(conn: &Connection) {
    println!("\n--- All Students ---");
    match SqliteStudentRepository::new(conn).list() {
        Ok(students) if students.is_empty() => println!("No students found."),
        Ok(students) => {
            for s in students {
                println!(
                    "ID: {}, Name: {}, Email: {}, Grade: {}, Enrollment Date: {}",
                    s.id,
                    s.name,
                    s.email.as_deref().unwrap_or("-"),
                    s.grade.as_deref().unwrap_or("-"),
                    s.enrollment_date
                );
            }
        }
        Err(err) => println!("Error: {err}"),
    }
}

fn teacher_menu(conn: &mut Connection) {
    loop {
        println!("\n=== Teacher Management ===");
        println!("1. Add New Teacher");
        println!("2. View All Teachers");
        println!("3. Update Teacher Information");
        println!("4. Remove Teacher");
        println!("5. Back to Main Menu");

        let Some(choice) = prompt_number("Please select an option: ") else {
            return;
        };
        match choice {
            1 => report_outcome(add_teacher(conn), "Teacher added successfully!"),
            2 => print_teachers(conn),
            3 => update_teacher(conn),
            4 => report_outcome(
                SqliteTeacherRepository::new(conn)
                    .delete(&prompt("Enter Teacher ID to remove: ")),
                "Teacher removed successfully!",
            ),
            5 => return,
            _ => println!("Invalid option. Please try again."),
        }
    }
}

fn add_teacher(conn: &Connection) -> schoolbook_core::RepoResult<()> {
    let id = prompt("Enter Teacher ID: ");
    let name = prompt("Enter Teacher Name: ");
    let mut teacher = Teacher::new(id, name);
    teacher.email = prompt_optional("Enter Email (optional): ");
    teacher.department = prompt_optional("Enter Department (optional): ");
    teacher.salary = prompt_salary("Enter Salary (optional): ");
    SqliteTeacherRepository::new(conn).create(&teacher)
}

fn update_teacher(conn: &Connection) {
    let repo = SqliteTeacherRepository::new(conn);
    let id = prompt("Enter Teacher ID to update: ");

    let current = match repo.get(&id) {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            println!("Teacher with ID {id} not found.");
            return;
        }
        Err(err) => {
            println!("Error: {err}");
            return;
        }
    };

    println!("Current Name: {}", current.name);
    println!("Current Email: {}", current.email.as_deref().unwrap_or("-"));
    println!(
        "Current Department: {}",
        current.department.as_deref().unwrap_or("-")
    );
    match current.salary {
        Some(salary) => println!("Current Salary: {salary:.2}"),
        None => println!("Current Salary: -"),
    }

    let edits = TeacherEdits {
        name: prompt_optional("Enter new Name (press Enter to keep current): "),
        email: prompt_optional("Enter new Email (press Enter to keep current): "),
        department: prompt_optional("Enter new Department (press Enter to keep current): "),
        salary: prompt_salary("Enter new Salary (press Enter to keep current): "),
    };

    report_update(repo.update(&id, &edits), "Teacher information updated successfully!");
}

fn print_teachers(conn: &Connection) {
    println!("\n--- All Teachers ---");
    match SqliteTeacherRepository::new(conn).list() {
        Ok(teachers) if teachers.is_empty() => println!("No teachers found."),
        Ok(teachers) => {
            for t in teachers {
                let salary = t
                    .salary
                    .map(|s| format!("${s:.2}"))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "ID: {}, Name: {}, Email: {}, Department: {}, Salary: {}",
                    t.id,
                    t.name,
                    t.email.as_deref().unwrap_or("-"),
                    t.department.as_deref().unwrap_or("-"),
                    salary
                );
            }
        }
        Err(err) => println!("Error: {err}"),
    }
}

fn course_menu(conn: &mut Connection) {
    loop {
        println!("\n=== Course Management ===");
        println!("1. Add New Course");
        println!("2. View All Courses");
        println!("3. Update Course Information");
        println!("4. Remove Course");
        println!("5. Back to Main Menu");

        let Some(choice) = prompt_number("Please select an option: ") else {
            return;
        };
        match choice {
            1 => report_outcome(add_course(conn), "Course added successfully!"),
            2 => print_courses(conn),
            3 => update_course(conn),
            4 => report_outcome(
                integrity::delete_course(conn, &prompt("Enter Course Code to remove: ")),
                "Course removed successfully!",
            ),
            5 => return,
            _ => println!("Invalid option. Please try again."),
        }
    }
}

fn add_course(conn: &Connection) -> schoolbook_core::RepoResult<()> {
    let code = prompt("Enter Course Code: ");
    let name = prompt("Enter Course Name: ");
    let mut course = Course::new(code, name);
    course.description = prompt_optional("Enter Course Description (optional): ");
    SqliteCourseRepository::new(conn).create(&course)
}

fn update_course(conn: &Connection) {
    let repo = SqliteCourseRepository::new(conn);
    let code = prompt("Enter Course Code to update: ");

    let current = match repo.get(&code) {
        Ok(Some(course)) => course,
        Ok(None) => {
            println!("Course with code {code} not found.");
            return;
        }
        Err(err) => {
            println!("Error: {err}");
            return;
        }
    };

    println!("Current Name: {}", current.name);
    println!(
        "Current Description: {}",
        current.description.as_deref().unwrap_or("-")
    );

    let edits = CourseEdits {
        name: prompt_optional("Enter new Name (press Enter to keep current): "),
        description: prompt_optional("Enter new Description (press Enter to keep current): "),
    };

    report_update(repo.update(&code, &edits), "Course information updated successfully!");
}

fn print_courses(conn: &Connection) {
    println!("\n--- All Courses ---");
    match SqliteCourseRepository::new(conn).list() {
        Ok(courses) if courses.is_empty() => println!("No courses found."),
        Ok(courses) => {
            for c in courses {
                println!(
                    "Code: {}, Name: {}, Description: {}",
                    c.code,
                    c.name,
                    c.description.as_deref().unwrap_or("-")
                );
            }
        }
        Err(err) => println!("Error: {err}"),
    }
}

fn attendance_menu(conn: &mut Connection) {
    loop {
        println!("\n=== Attendance Management ===");
        println!("1. Mark Attendance");
        println!("2. View Attendance Records");
        println!("3. Back to Main Menu");

        let Some(choice) = prompt_number("Please select an option: ") else {
            return;
        };
        match choice {
            1 => mark_attendance(conn),
            2 => print_attendance(conn),
            3 => return,
            _ => println!("Invalid option. Please try again."),
        }
    }
}

fn mark_attendance(conn: &Connection) {
    print_students(conn);
    let student_id = prompt("Enter Student ID: ");

    print_courses(conn);
    let course_code = prompt("Enter Course Code: ");

    let date = prompt_date("Enter Date (YYYY-MM-DD) or press Enter for today: ");
    let is_present = prompt("Is the student present? (Y/N): ").eq_ignore_ascii_case("y");

    let entry = AttendanceEntry {
        student_id,
        course_code,
        date,
        is_present,
    };

    report_outcome(
        SqliteAttendanceRepository::new(conn).mark(&entry).map(|_| ()),
        "Attendance recorded successfully!",
    );
}

fn print_attendance(conn: &Connection) {
    println!("\n--- Attendance Records ---");
    match SqliteAttendanceRepository::new(conn).list_with_names() {
        Ok(records) if records.is_empty() => println!("No attendance records found."),
        Ok(records) => {
            for r in records {
                println!(
                    "Student: {}, Course: {}, Date: {}, Present: {}",
                    r.student_name,
                    r.course_name,
                    r.date,
                    if r.is_present { "Yes" } else { "No" }
                );
            }
        }
        Err(err) => println!("Error: {err}"),
    }
}

fn reports_menu(conn: &Connection) {
    loop {
        println!("\n=== Generate Reports ===");
        println!("1. Student Report");
        println!("2. Teacher Report");
        println!("3. Course Report");
        println!("4. Attendance Report");
        println!("5. Back to Main Menu");

        let Some(choice) = prompt_number("Please select an option: ") else {
            return;
        };
        match choice {
            1 => {
                print_students(conn);
                match student_report(conn) {
                    Ok(report) => println!("Total Students: {}", report.total),
                    Err(err) => println!("Error: {err}"),
                }
            }
            2 => {
                print_teachers(conn);
                match teacher_report(conn) {
                    Ok(report) => {
                        println!("Total Teachers: {}", report.total);
                        println!("Total Salary Expenditure: ${:.2}", report.salary_total);
                    }
                    Err(err) => println!("Error: {err}"),
                }
            }
            3 => {
                print_courses(conn);
                match course_report(conn) {
                    Ok(report) => println!("Total Courses: {}", report.total),
                    Err(err) => println!("Error: {err}"),
                }
            }
            4 => match attendance_report(conn) {
                Ok(report) => {
                    println!("\n--- Attendance Report ---");
                    println!("Total Attendance Records: {}", report.total);
                    println!("Present: {}", report.present);
                    println!("Absent: {}", report.absent);
                    println!("Attendance Rate: {:.2}%", report.rate_percent);
                }
                Err(err) => println!("Error: {err}"),
            },
            5 => return,
            _ => println!("Invalid option. Please try again."),
        }
    }
}

fn report_outcome(result: schoolbook_core::RepoResult<()>, success: &str) {
    match result {
        Ok(()) => println!("{success}"),
        Err(err) => println!("{err}"),
    }
}

fn report_update(result: schoolbook_core::RepoResult<schoolbook_core::UpdateOutcome>, success: &str) {
    match result {
        Ok(schoolbook_core::UpdateOutcome::Updated) => println!("{success}"),
        Ok(schoolbook_core::UpdateOutcome::NoChanges) => println!("No changes made."),
        Err(err) => println!("{err}"),
    }
}

fn prompt(text: &str) -> String {
    print!("{text}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

/// Empty input means "not provided" / "keep current".
fn prompt_optional(text: &str) -> Option<String> {
    let value = prompt(text);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Loops until the input parses as a number. Returns `None` once stdin is
/// closed so menu loops exit instead of re-prompting on empty reads.
fn prompt_number(text: &str) -> Option<u32> {
    read_number(text, &mut io::stdin().lock())
}

fn read_number(text: &str, input: &mut impl BufRead) -> Option<u32> {
    loop {
        print!("{text}");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
        match line.trim().parse() {
            Ok(value) => return Some(value),
            Err(_) => println!("Invalid input. Please enter a number."),
        }
    }
}

fn prompt_salary(text: &str) -> Option<f64> {
    let input = prompt(text);
    if input.is_empty() {
        return None;
    }
    match input.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            println!("Invalid salary format. Salary not updated.");
            None
        }
    }
}

fn prompt_date(text: &str) -> NaiveDate {
    let input = prompt(text);
    if input.is_empty() {
        return Local::now().date_naive();
    }
    match NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            println!("Invalid date format. Using today's date.");
            Local::now().date_naive()
        }
    }
}
