//! Overwrite a student's name and email

use std::sync::Arc;

use async_trait::async_trait;

use super::{find_student, CommandHandler, EditPersonalInfoCommand};
use crate::domain::ports::{UnitOfWork, UnitOfWorkFactory};
use crate::error::DomainError;

pub struct EditPersonalInfoCommandHandler<F: UnitOfWorkFactory> {
    sessions: Arc<F>,
}

impl<F: UnitOfWorkFactory> EditPersonalInfoCommandHandler<F> {
    pub fn new(sessions: Arc<F>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl<F: UnitOfWorkFactory> CommandHandler<EditPersonalInfoCommand>
    for EditPersonalInfoCommandHandler<F>
{
    async fn handle(&self, command: &EditPersonalInfoCommand) -> Result<(), DomainError> {
        let uow = self.sessions.begin().await?;

        let mut student = find_student(&uow, command.id).await?;
        student.edit_personal_info(&command.name, &command.email);

        uow.students().save(&mut student).await?;
        uow.commit().await?;

        tracing::info!(student_id = command.id, "Student personal info edited");
        Ok(())
    }
}
