//! Remove one of a student's enrollments, with a mandatory comment

use std::sync::Arc;

use async_trait::async_trait;

use super::{enrollment_not_found, find_student, CommandHandler, DisenrollCommand};
use crate::domain::entities::EnrollmentNumber;
use crate::domain::ports::{UnitOfWork, UnitOfWorkFactory};
use crate::error::DomainError;

pub struct DisenrollCommandHandler<F: UnitOfWorkFactory> {
    sessions: Arc<F>,
}

impl<F: UnitOfWorkFactory> DisenrollCommandHandler<F> {
    pub fn new(sessions: Arc<F>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl<F: UnitOfWorkFactory> CommandHandler<DisenrollCommand> for DisenrollCommandHandler<F> {
    async fn handle(&self, command: &DisenrollCommand) -> Result<(), DomainError> {
        let uow = self.sessions.begin().await?;

        let mut student = find_student(&uow, command.id).await?;

        if command.comment.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Disenrollment comment is required".to_string(),
            ));
        }

        let removed = EnrollmentNumber::from_ordinal(command.enrollment_number)
            .and_then(|n| student.remove_enrollment(n, &command.comment))
            .ok_or_else(|| enrollment_not_found(command.enrollment_number))?;

        uow.students().save(&mut student).await?;
        uow.commit().await?;

        tracing::info!(
            student_id = command.id,
            enrollment = command.enrollment_number,
            course = %removed.course.name,
            "Student disenrolled"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Grade;
    use crate::test_utils::{insert_student, seeded_store, test_uow_factory};

    fn command(id: i64, number: i32, comment: &str) -> DisenrollCommand {
        DisenrollCommand {
            id,
            enrollment_number: number,
            comment: comment.to_string(),
        }
    }

    #[tokio::test]
    async fn disenroll_frees_slot_and_records_comment() {
        let store = seeded_store();
        let id = insert_student(&store, "Bob", &[("Math", Grade::B), ("CS101", Grade::A)]);
        let handler = DisenrollCommandHandler::new(test_uow_factory(&store));

        handler
            .handle(&command(id.0, 1, "Schedule conflict"))
            .await
            .unwrap();

        let student = store.student(id).unwrap();
        assert!(student.first_enrollment().is_none());
        assert_eq!(student.second_enrollment().unwrap().course.name, "CS101");

        let history = store.disenrollments();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].0, id);
        assert_eq!(history[0].1.course.name, "Math");
        assert_eq!(history[0].1.comment, "Schedule conflict");
    }

    #[tokio::test]
    async fn disenroll_blank_comment_fails_before_removal() {
        let store = seeded_store();
        let id = insert_student(&store, "Bob", &[("Math", Grade::B)]);
        let before = store.student(id).unwrap();
        let handler = DisenrollCommandHandler::new(test_uow_factory(&store));

        for comment in ["", "   ", "\t\n"] {
            let err = handler.handle(&command(id.0, 1, comment)).await.unwrap_err();
            assert_eq!(
                err,
                DomainError::InvariantViolation("Disenrollment comment is required".to_string())
            );
        }

        assert_eq!(store.student(id).unwrap(), before);
        assert!(store.disenrollments().is_empty());
        assert_eq!(store.commits(), 0);
    }

    #[tokio::test]
    async fn disenroll_checks_comment_before_enrollment() {
        let store = seeded_store();
        let id = insert_student(&store, "Bob", &[]);
        let handler = DisenrollCommandHandler::new(test_uow_factory(&store));

        let err = handler.handle(&command(id.0, 2, " ")).await.unwrap_err();

        assert_eq!(
            err,
            DomainError::InvariantViolation("Disenrollment comment is required".to_string())
        );
    }

    #[tokio::test]
    async fn disenroll_empty_slot_is_not_found() {
        let store = seeded_store();
        let id = insert_student(&store, "Bob", &[("Math", Grade::B)]);
        let handler = DisenrollCommandHandler::new(test_uow_factory(&store));

        let err = handler
            .handle(&command(id.0, 2, "Dropping"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::NotFound("No enrollment found with number '2'".to_string())
        );
        assert_eq!(store.commits(), 0);
    }
}
