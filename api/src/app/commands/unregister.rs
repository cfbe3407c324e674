//! Remove a student and everything it owns

use std::sync::Arc;

use async_trait::async_trait;

use super::{find_student, CommandHandler, UnregisterCommand};
use crate::domain::entities::StudentId;
use crate::domain::ports::{UnitOfWork, UnitOfWorkFactory};
use crate::error::DomainError;

pub struct UnregisterCommandHandler<F: UnitOfWorkFactory> {
    sessions: Arc<F>,
}

impl<F: UnitOfWorkFactory> UnregisterCommandHandler<F> {
    pub fn new(sessions: Arc<F>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl<F: UnitOfWorkFactory> CommandHandler<UnregisterCommand> for UnregisterCommandHandler<F> {
    async fn handle(&self, command: &UnregisterCommand) -> Result<(), DomainError> {
        let uow = self.sessions.begin().await?;
        let student = find_student(&uow, command.id).await?;
        let id = student.id.unwrap_or(StudentId(command.id));

        uow.students().delete(id).await?;
        uow.commit().await?;

        tracing::info!(student_id = %id, "Student unregistered");
        Ok(())
    }
}
