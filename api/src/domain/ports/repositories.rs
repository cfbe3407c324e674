//! Repository port traits
//!
//! Repositories load and stage entities inside a unit of work.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{Course, Student, StudentId};
use crate::error::DomainError;

/// Repository for Student aggregates
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Load a student together with its enrollments
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, DomainError>;

    /// Insert or update a student, its enrollment slots and any pending
    /// disenrollments. Assigns the id on first save.
    async fn save(&self, student: &mut Student) -> Result<StudentId, DomainError>;

    /// Delete a student and everything it owns
    async fn delete(&self, id: StudentId) -> Result<(), DomainError>;
}

/// Repository for Course reference data
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Find a course by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Course>, DomainError>;
}
