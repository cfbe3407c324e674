//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::sync::Arc;
use std::time::Duration;

use crate::app::decorators::RetryPolicy;
use crate::app::Messages;
use crate::domain::entities::{Grade, Student, StudentId};

use super::{InMemoryStore, InMemoryStudentListReader, InMemoryUnitOfWorkFactory};

/// Store seeded with the courses used across tests
pub fn seeded_store() -> Arc<InMemoryStore> {
    Arc::new(
        InMemoryStore::new()
            .with_course("Math", 3)
            .with_course("CS101", 4)
            .with_course("Calculus", 5)
            .with_course("Chemistry", 4)
            .with_course("Literature", 4),
    )
}

pub fn test_uow_factory(store: &Arc<InMemoryStore>) -> Arc<InMemoryUnitOfWorkFactory> {
    Arc::new(InMemoryUnitOfWorkFactory::new(store.clone()))
}

/// Retry policy with millisecond backoff so retry tests stay fast
pub fn test_retry_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(2),
    }
}

/// Dispatcher wired to in-memory ports over `store`
pub fn test_messages(store: &Arc<InMemoryStore>) -> Messages {
    Messages::new(
        test_uow_factory(store),
        Arc::new(InMemoryStudentListReader::new(store.clone())),
        test_retry_policy(),
    )
}

/// Insert a committed student enrolled in the named courses, in slot order
pub fn insert_student(store: &InMemoryStore, name: &str, courses: &[(&str, Grade)]) -> StudentId {
    let mut student = Student::new(name, format!("{}@example.com", name.to_lowercase()));
    for (course, grade) in courses {
        let course = store
            .course(course)
            .unwrap_or_else(|| panic!("course {} not seeded", course));
        student.enroll(course, *grade).unwrap();
    }
    store.insert_student(student)
}
