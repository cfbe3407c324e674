//! Read-side port
//!
//! The read side never loads aggregates; it returns flat rows from the
//! denormalized student columns.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::DomainError;

/// One row of the student listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub course1: Option<String>,
    pub course1_grade: Option<String>,
    pub course1_credits: Option<i32>,
    pub course2: Option<String>,
    pub course2_grade: Option<String>,
    pub course2_credits: Option<i32>,
}

#[async_trait]
pub trait StudentListReader: Send + Sync {
    /// Students ordered by id. `enrolled_in` matches either course slot;
    /// `number_of_courses` matches the enrollment count exactly.
    async fn list(
        &self,
        enrolled_in: Option<&str>,
        number_of_courses: Option<i32>,
    ) -> Result<Vec<StudentRow>, DomainError>;
}
