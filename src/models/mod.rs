//! Domain models for the student information service.
//!
//! # Entities
//!
//! - [`Department`]: Owns many courses and many students through `department_id`.
//! - [`Course`]: Belongs to at most one department; linked to students through enrollments.
//! - [`Student`]: Belongs to at most one department; linked to courses through enrollments.
//!
//! Enrollments live in the `student_courses` join table and carry nothing but the
//! two foreign keys, so they have no model of their own here.
//!
//! # Response Shapes
//!
//! Some endpoints return pre-shaped DTOs instead of bare rows:
//!
//! - [`StudentPage`]: One page of [`StudentSummary`] rows with their course links.
//! - [`StudentCourses`]: A student's first name with full [`Course`] records.
//! - [`StudentProfile`]: The public field subset returned by first-name queries.

mod course;
mod department;
pub mod pagination;
mod student;

pub use course::*;
pub use department::*;
pub use pagination::{PageRequest, PAGE_SIZE};
pub use student::*;
