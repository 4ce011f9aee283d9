mod schema;
mod seed;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::models::*;

pub use seed::SeedSummary;

const DEPARTMENT_COLUMNS: &str = "id, name, created_at, updated_at";
const COURSE_COLUMNS: &str = "id, name, url, department_id, created_at, updated_at";
const STUDENT_COLUMNS: &str =
    "id, first_name, last_name, student_id, address, department_id, created_at, updated_at";

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::from_connection(conn)
    }

    pub fn open_default() -> Result<Self> {
        Self::open(default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn()?;
        schema::run_migrations(&conn)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    // ============================================================
    // Department operations
    // ============================================================

    pub fn get_all_departments(&self) -> Result<Vec<Department>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments ORDER BY id"
        ))?;

        let departments = stmt
            .query_map([], department_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(departments)
    }

    pub fn get_department(&self, id: i64) -> Result<Option<Department>> {
        let conn = self.conn()?;
        let department = conn
            .query_row(
                &format!("SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE id = ?"),
                [id],
                department_from_row,
            )
            .optional()?;
        Ok(department)
    }

    pub fn create_department(&self, input: CreateDepartmentInput) -> Result<Department> {
        insert_department(&*self.conn()?, input)
    }

    // ============================================================
    // Course operations
    // ============================================================

    pub fn get_all_courses(&self) -> Result<Vec<Course>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY id"))?;

        let courses = stmt
            .query_map([], course_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(courses)
    }

    pub fn get_course(&self, id: i64) -> Result<Option<Course>> {
        let conn = self.conn()?;
        let course = conn
            .query_row(
                &format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?"),
                [id],
                course_from_row,
            )
            .optional()?;
        Ok(course)
    }

    pub fn create_course(&self, input: CreateCourseInput) -> Result<Course> {
        insert_course(&*self.conn()?, input)
    }

    // ============================================================
    // Student operations
    // ============================================================

    /// Count all students and load one page of them with their course names.
    ///
    /// Both reads happen under the same connection lock so the total and the
    /// page come from one consistent view of the table.
    pub fn get_students_page(&self, page: PageRequest) -> Result<StudentPage> {
        let conn = self.conn()?;
        let total_students: i64 =
            conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;

        let mut stmt = conn.prepare(
            "SELECT s.id, s.first_name, s.last_name, s.student_id, s.address, c.name
             FROM (
                 SELECT id, first_name, last_name, student_id, address
                 FROM students ORDER BY id LIMIT ? OFFSET ?
             ) s
             LEFT JOIN student_courses sc ON sc.student_id = s.id
             LEFT JOIN courses c ON c.id = sc.course_id
             ORDER BY s.id, c.id",
        )?;

        let mut rows = stmt.query((i64::from(page.limit()), page.offset() as i64))?;
        let mut students: Vec<StudentSummary> = Vec::new();

        while let Some(row) = rows.next()? {
            let id: i64 = row.get(0)?;
            if students.last().map(|s| s.id) != Some(id) {
                students.push(StudentSummary {
                    id,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    student_id: row.get(3)?,
                    address: row.get(4)?,
                    courses: Vec::new(),
                });
            }

            // NULL course name: the student has no enrollments
            if let Some(course_name) = row.get::<_, Option<String>>(5)? {
                if let Some(student) = students.last_mut() {
                    student.courses.push(CourseLink::for_student(id, course_name));
                }
            }
        }

        Ok(StudentPage {
            total_students,
            total_pages: page.total_pages(total_students),
            current_page: page.number(),
            students,
        })
    }

    pub fn get_student(&self, id: i64) -> Result<Option<Student>> {
        let conn = self.conn()?;
        let student = conn
            .query_row(
                &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"),
                [id],
                student_from_row,
            )
            .optional()?;
        Ok(student)
    }

    pub fn get_student_courses(&self, id: i64) -> Result<Option<StudentCourses>> {
        let conn = self.conn()?;
        let Some(first_name) = conn
            .query_row("SELECT first_name FROM students WHERE id = ?", [id], |row| {
                row.get::<_, String>(0)
            })
            .optional()?
        else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT c.id, c.name, c.url, c.department_id, c.created_at, c.updated_at
             FROM courses c
             JOIN student_courses sc ON sc.course_id = c.id
             WHERE sc.student_id = ?
             ORDER BY c.id",
        )?;

        let courses = stmt
            .query_map([id], course_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(StudentCourses {
            student: first_name,
            courses,
        }))
    }

    /// Students whose first name matches exactly (SQLite BINARY collation).
    pub fn find_students_by_first_name(&self, first_name: &str) -> Result<Vec<StudentProfile>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT first_name, last_name, student_id, address
             FROM students WHERE first_name = ? ORDER BY id",
        )?;

        let students = stmt
            .query_map([first_name], |row| {
                Ok(StudentProfile {
                    first_name: row.get(0)?,
                    last_name: row.get(1)?,
                    student_id: row.get(2)?,
                    address: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(students)
    }

    pub fn find_students_by_name(&self, first_name: &str, last_name: &str) -> Result<Vec<Student>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students
             WHERE first_name = ? AND last_name = ? ORDER BY id"
        ))?;

        let students = stmt
            .query_map([first_name, last_name], student_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(students)
    }

    pub fn create_student(&self, input: CreateStudentInput) -> Result<Student> {
        insert_student(&*self.conn()?, input)
    }

    // ============================================================
    // Enrollment operations
    // ============================================================

    /// Enroll a student in a course. Fails if either row is missing.
    pub fn enroll(&self, student_id: i64, course_id: i64) -> Result<()> {
        insert_enrollment(&*self.conn()?, student_id, course_id)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

/// Default on-disk location for the database file.
pub fn default_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "student-info")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join("student-info.db"))
}

// ============================================================
// Inserts shared by the create methods and seeding
// ============================================================

fn insert_department(conn: &Connection, input: CreateDepartmentInput) -> Result<Department> {
    let now = Utc::now();

    conn.execute(
        "INSERT INTO departments (name, created_at, updated_at) VALUES (?, ?, ?)",
        (&input.name, now.to_rfc3339(), now.to_rfc3339()),
    )?;

    Ok(Department {
        id: conn.last_insert_rowid(),
        name: input.name,
        created_at: now,
        updated_at: now,
    })
}

fn insert_course(conn: &Connection, input: CreateCourseInput) -> Result<Course> {
    let now = Utc::now();

    conn.execute(
        "INSERT INTO courses (name, url, department_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
        (
            &input.name,
            &input.url,
            input.department_id,
            now.to_rfc3339(),
            now.to_rfc3339(),
        ),
    )?;

    Ok(Course {
        id: conn.last_insert_rowid(),
        name: input.name,
        url: input.url,
        department_id: input.department_id,
        created_at: now,
        updated_at: now,
    })
}

fn insert_student(conn: &Connection, input: CreateStudentInput) -> Result<Student> {
    let now = Utc::now();

    conn.execute(
        "INSERT INTO students (first_name, last_name, student_id, address, department_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        (
            &input.first_name,
            &input.last_name,
            &input.student_id,
            &input.address,
            input.department_id,
            now.to_rfc3339(),
            now.to_rfc3339(),
        ),
    )?;

    Ok(Student {
        id: conn.last_insert_rowid(),
        first_name: input.first_name,
        last_name: input.last_name,
        student_id: input.student_id,
        address: input.address,
        department_id: input.department_id,
        created_at: now,
        updated_at: now,
    })
}

fn insert_enrollment(conn: &Connection, student_id: i64, course_id: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO student_courses (student_id, course_id) VALUES (?, ?)",
        (student_id, course_id),
    )?;
    Ok(())
}

fn department_from_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: parse_datetime(row.get::<_, String>(2)?),
        updated_at: parse_datetime(row.get::<_, String>(3)?),
    })
}

fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get(2)?,
        department_id: row.get(3)?,
        created_at: parse_datetime(row.get::<_, String>(4)?),
        updated_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        student_id: row.get(3)?,
        address: row.get(4)?,
        department_id: row.get(5)?,
        created_at: parse_datetime(row.get::<_, String>(6)?),
        updated_at: parse_datetime(row.get::<_, String>(7)?),
    })
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
