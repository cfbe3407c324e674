//! Move an existing enrollment to another course

use std::sync::Arc;

use async_trait::async_trait;

use super::{
    enrollment_not_found, find_course, find_student, parse_grade, CommandHandler, TransferCommand,
};
use crate::domain::entities::EnrollmentNumber;
use crate::domain::ports::{UnitOfWork, UnitOfWorkFactory};
use crate::error::DomainError;

pub struct TransferCommandHandler<F: UnitOfWorkFactory> {
    sessions: Arc<F>,
}

impl<F: UnitOfWorkFactory> TransferCommandHandler<F> {
    pub fn new(sessions: Arc<F>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl<F: UnitOfWorkFactory> CommandHandler<TransferCommand> for TransferCommandHandler<F> {
    async fn handle(&self, command: &TransferCommand) -> Result<(), DomainError> {
        let uow = self.sessions.begin().await?;

        let mut student = find_student(&uow, command.id).await?;
        let course = find_course(&uow, &command.course).await?;
        let grade = parse_grade(&command.grade)?;

        let enrollment = EnrollmentNumber::from_ordinal(command.enrollment_number)
            .and_then(|n| student.enrollment_mut(n))
            .ok_or_else(|| enrollment_not_found(command.enrollment_number))?;
        enrollment.update(course, grade);

        uow.students().save(&mut student).await?;
        uow.commit().await?;

        tracing::info!(
            student_id = command.id,
            enrollment = command.enrollment_number,
            course = %command.course,
            "Student transferred"
        );
        Ok(())
    }
}
