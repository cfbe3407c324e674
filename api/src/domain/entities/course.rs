//! Course domain entity
//!
//! Reference data: courses are seeded by migrations and only looked up by name.

use serde::{Deserialize, Serialize};

/// Unique identifier for a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(pub i64);

/// A course a student can enroll in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub credits: i32,
}
