//! Domain entities
//!
//! Pure domain models for the enrollment system.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod course;
pub mod enrollment;
pub mod grade;
pub mod student;

pub use course::{Course, CourseId};
pub use enrollment::{Disenrollment, Enrollment, EnrollmentNumber};
pub use grade::Grade;
pub use student::{Student, StudentId};
