//! SeaORM entities
//!
//! Table models matching `migrations/0001_init.sql`.

pub mod courses;
pub mod disenrollments;
pub mod enrollments;
pub mod students;
