//! Enroll an existing student in a course

use std::sync::Arc;

use async_trait::async_trait;

use super::{find_course, find_student, parse_grade, CommandHandler, EnrollCommand};
use crate::domain::ports::{UnitOfWork, UnitOfWorkFactory};
use crate::error::DomainError;

pub struct EnrollCommandHandler<F: UnitOfWorkFactory> {
    sessions: Arc<F>,
}

impl<F: UnitOfWorkFactory> EnrollCommandHandler<F> {
    pub fn new(sessions: Arc<F>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl<F: UnitOfWorkFactory> CommandHandler<EnrollCommand> for EnrollCommandHandler<F> {
    async fn handle(&self, command: &EnrollCommand) -> Result<(), DomainError> {
        let uow = self.sessions.begin().await?;

        let mut student = find_student(&uow, command.id).await?;
        let course = find_course(&uow, &command.course).await?;
        let grade = parse_grade(&command.grade)?;
        let number = student.enroll(course, grade)?;

        uow.students().save(&mut student).await?;
        uow.commit().await?;

        tracing::info!(
            student_id = command.id,
            enrollment = %number,
            course = %command.course,
            "Student enrolled"
        );
        Ok(())
    }
}
