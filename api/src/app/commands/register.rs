//! Register a new student, optionally enrolled in up to two courses

use std::sync::Arc;

use async_trait::async_trait;

use super::{find_course, parse_grade, CommandHandler, RegisterCommand};
use crate::domain::entities::Student;
use crate::domain::ports::{UnitOfWork, UnitOfWorkFactory};
use crate::error::DomainError;

pub struct RegisterCommandHandler<F: UnitOfWorkFactory> {
    sessions: Arc<F>,
}

impl<F: UnitOfWorkFactory> RegisterCommandHandler<F> {
    pub fn new(sessions: Arc<F>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl<F: UnitOfWorkFactory> CommandHandler<RegisterCommand> for RegisterCommandHandler<F> {
    async fn handle(&self, command: &RegisterCommand) -> Result<(), DomainError> {
        let uow = self.sessions.begin().await?;
        let mut student = Student::new(&command.name, &command.email);

        // A slot is only filled when both its course and grade are given
        let requested = [
            (&command.course1, &command.course1_grade),
            (&command.course2, &command.course2_grade),
        ];
        for (course, grade) in requested {
            if let (Some(course), Some(grade)) = (course, grade) {
                let course = find_course(&uow, course).await?;
                let grade = parse_grade(grade)?;
                student.enroll(course, grade)?;
            }
        }

        let id = uow.students().save(&mut student).await?;
        uow.commit().await?;

        tracing::info!(
            student_id = %id,
            enrollments = student.number_of_enrollments(),
            "Student registered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Grade;
    use crate::test_utils::{seeded_store, test_uow_factory};

    fn command(course1: Option<(&str, &str)>, course2: Option<(&str, &str)>) -> RegisterCommand {
        RegisterCommand {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            course1: course1.map(|(c, _)| c.to_string()),
            course1_grade: course1.map(|(_, g)| g.to_string()),
            course2: course2.map(|(c, _)| c.to_string()),
            course2_grade: course2.map(|(_, g)| g.to_string()),
        }
    }

    #[tokio::test]
    async fn register_without_courses_has_no_enrollments() {
        let store = seeded_store();
        let handler = RegisterCommandHandler::new(test_uow_factory(&store));

        handler.handle(&command(None, None)).await.unwrap();

        let students = store.students();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "Alice");
        assert_eq!(students[0].number_of_enrollments(), 0);
        assert_eq!(store.commits(), 1);
    }

    #[tokio::test]
    async fn register_with_two_courses_fills_both_slots() {
        let store = seeded_store();
        let handler = RegisterCommandHandler::new(test_uow_factory(&store));

        handler
            .handle(&command(Some(("Math", "A")), Some(("Chemistry", "C"))))
            .await
            .unwrap();

        let student = &store.students()[0];
        assert_eq!(student.first_enrollment().unwrap().course.name, "Math");
        assert_eq!(student.first_enrollment().unwrap().grade, Grade::A);
        assert_eq!(student.second_enrollment().unwrap().course.name, "Chemistry");
        assert_eq!(student.second_enrollment().unwrap().grade, Grade::C);
    }

    #[tokio::test]
    async fn register_skips_slot_without_grade() {
        let store = seeded_store();
        let handler = RegisterCommandHandler::new(test_uow_factory(&store));
        let mut cmd = command(None, Some(("Math", "B")));
        cmd.course1 = Some("Chemistry".to_string());

        handler.handle(&cmd).await.unwrap();

        let student = &store.students()[0];
        assert_eq!(student.number_of_enrollments(), 1);
        assert_eq!(student.first_enrollment().unwrap().course.name, "Math");
    }

    #[tokio::test]
    async fn register_with_unknown_course_fails_without_commit() {
        let store = seeded_store();
        let handler = RegisterCommandHandler::new(test_uow_factory(&store));

        let err = handler
            .handle(&command(Some(("Astrology", "A")), None))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::Validation("Course is incorrect: 'Astrology'".to_string())
        );
        assert!(store.students().is_empty());
        assert_eq!(store.commits(), 0);
    }

    #[tokio::test]
    async fn register_with_bad_grade_fails_without_commit() {
        let store = seeded_store();
        let handler = RegisterCommandHandler::new(test_uow_factory(&store));

        let err = handler
            .handle(&command(Some(("Math", "a")), None))
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::Validation("Grade is incorrect: 'a'".to_string()));
        assert!(store.students().is_empty());
    }
}
