//! Command side
//!
//! One immutable command per mutating endpoint and one handler per command.
//! Handlers validate in a fixed order (student, course, grade, domain rule)
//! and commit a single unit of work only when every check has passed.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::{Course, Grade, Student, StudentId};
use crate::domain::ports::UnitOfWork;
use crate::error::DomainError;

pub mod disenroll;
pub mod edit_personal_info;
pub mod enroll;
pub mod register;
pub mod transfer;
pub mod unregister;

pub use disenroll::DisenrollCommandHandler;
pub use edit_personal_info::EditPersonalInfoCommandHandler;
pub use enroll::EnrollCommandHandler;
pub use register::RegisterCommandHandler;
pub use transfer::TransferCommandHandler;
pub use unregister::UnregisterCommandHandler;

/// Handles one command type. `Ok(())` is success; business failures come back
/// as `NotFound`, `Validation` or `InvariantViolation` carrying the message.
#[async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Send + Sync,
{
    async fn handle(&self, command: &C) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterCommand {
    pub name: String,
    pub email: String,
    pub course1: Option<String>,
    pub course1_grade: Option<String>,
    pub course2: Option<String>,
    pub course2_grade: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnregisterCommand {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollCommand {
    pub id: i64,
    pub course: String,
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferCommand {
    pub id: i64,
    pub enrollment_number: i32,
    pub course: String,
    pub grade: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisenrollCommand {
    pub id: i64,
    pub enrollment_number: i32,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditPersonalInfoCommand {
    pub id: i64,
    pub name: String,
    pub email: String,
}

async fn find_student<U: UnitOfWork>(uow: &U, id: i64) -> Result<Student, DomainError> {
    uow.students()
        .find_by_id(StudentId(id))
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("No student found for Id {}", id)))
}

async fn find_course<U: UnitOfWork>(uow: &U, name: &str) -> Result<Course, DomainError> {
    uow.courses()
        .find_by_name(name)
        .await?
        .ok_or_else(|| DomainError::Validation(format!("Course is incorrect: '{}'", name)))
}

fn parse_grade(grade: &str) -> Result<Grade, DomainError> {
    grade
        .parse()
        .map_err(|_| DomainError::Validation(format!("Grade is incorrect: '{}'", grade)))
}

fn enrollment_not_found(number: i32) -> DomainError {
    DomainError::NotFound(format!("No enrollment found with number '{}'", number))
}
