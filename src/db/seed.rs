//! Demo data for local development.

use anyhow::Result;
use serde::Serialize;

use super::{insert_course, insert_department, insert_enrollment, insert_student, Database};
use crate::models::*;

const DEPARTMENTS: &[(&str, &[&str])] = &[
    ("Computer Science", &["Algorithms", "Operating Systems", "Databases"]),
    ("Mathematics", &["Linear Algebra", "Calculus II"]),
    ("History", &["Modern Europe", "Ancient Rome"]),
];

const FIRST_NAMES: &[&str] = &["Ada", "Alan", "Grace", "Edsger", "Barbara", "Donald", "Frances"];
const LAST_NAMES: &[&str] = &["Lovelace", "Turing", "Hopper", "Dijkstra", "Liskov", "Knuth"];

/// Counts of rows inserted by [`Database::seed_demo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub departments: usize,
    pub courses: usize,
    pub students: usize,
    pub enrollments: usize,
}

impl Database {
    /// Insert the demo departments and courses plus `students` students.
    ///
    /// Names, departments and enrollments are picked round-robin so repeated
    /// runs produce the same shape of data. Everything is inserted in one
    /// transaction; a failure leaves the database unchanged. Seeding appends,
    /// so a second run adds a second copy of the catalogue.
    pub fn seed_demo(&self, students: usize) -> Result<SeedSummary> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut summary = SeedSummary::default();
        let mut departments = Vec::new();
        let mut courses = Vec::new();

        for (name, course_names) in DEPARTMENTS {
            let department = insert_department(&tx, CreateDepartmentInput {
                name: name.to_string(),
            })?;
            summary.departments += 1;

            for course_name in *course_names {
                let slug = course_name.to_lowercase().replace(' ', "-");
                courses.push(insert_course(&tx, CreateCourseInput {
                    name: course_name.to_string(),
                    url: Some(format!("https://courses.example.edu/{}", slug)),
                    department_id: Some(department.id),
                })?);
                summary.courses += 1;
            }
            departments.push(department);
        }

        for n in 0..students {
            let student = insert_student(&tx, CreateStudentInput {
                first_name: FIRST_NAMES[n % FIRST_NAMES.len()].to_string(),
                last_name: LAST_NAMES[n % LAST_NAMES.len()].to_string(),
                student_id: format!("S{:05}", n + 1),
                address: Some(format!("{} College Ave", 100 + n)),
                department_id: Some(departments[n % departments.len()].id),
            })?;
            summary.students += 1;

            // 1 to 3 consecutive courses, wrapping around the catalogue
            for k in 0..(n % 3 + 1) {
                let course = &courses[(n + k) % courses.len()];
                insert_enrollment(&tx, student.id, course.id)?;
                summary.enrollments += 1;
            }
        }

        tx.commit()?;

        tracing::info!(
            departments = summary.departments,
            courses = summary.courses,
            students = summary.students,
            enrollments = summary.enrollments,
            "Seeded demo data"
        );

        Ok(summary)
    }
}
