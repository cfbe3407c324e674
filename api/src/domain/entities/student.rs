//! Student domain entity
//!
//! A student owns at most two enrollments, held in fixed slots. Removing the
//! first enrollment does not move the second one into slot 1.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{Course, Disenrollment, Enrollment, EnrollmentNumber, Grade};
use crate::error::DomainError;

/// Unique identifier for a student, generated by the store on first save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub i64);

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// `None` until the student has been saved
    pub id: Option<StudentId>,
    pub name: String,
    pub email: String,
    slots: [Option<Enrollment>; 2],
    disenrollments: Vec<Disenrollment>,
}

impl Student {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            slots: [None, None],
            disenrollments: Vec::new(),
        }
    }

    /// Rebuild a persisted student from its stored slots
    pub fn restore(
        id: StudentId,
        name: String,
        email: String,
        first: Option<Enrollment>,
        second: Option<Enrollment>,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            email,
            slots: [first, second],
            disenrollments: Vec::new(),
        }
    }

    pub fn first_enrollment(&self) -> Option<&Enrollment> {
        self.enrollment(EnrollmentNumber::First)
    }

    pub fn second_enrollment(&self) -> Option<&Enrollment> {
        self.enrollment(EnrollmentNumber::Second)
    }

    pub fn enrollment(&self, number: EnrollmentNumber) -> Option<&Enrollment> {
        self.slots[number.index()].as_ref()
    }

    pub fn enrollment_mut(&mut self, number: EnrollmentNumber) -> Option<&mut Enrollment> {
        self.slots[number.index()].as_mut()
    }

    /// Occupied slots in slot order
    pub fn enrollments(&self) -> impl Iterator<Item = (EnrollmentNumber, &Enrollment)> + '_ {
        EnrollmentNumber::ALL
            .into_iter()
            .filter_map(|n| self.enrollment(n).map(|e| (n, e)))
    }

    pub fn number_of_enrollments(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Put a new enrollment in the first free slot
    pub fn enroll(&mut self, course: Course, grade: Grade) -> Result<EnrollmentNumber, DomainError> {
        let number = EnrollmentNumber::ALL
            .into_iter()
            .find(|n| self.slots[n.index()].is_none())
            .ok_or_else(|| {
                DomainError::InvariantViolation("Cannot have more than 2 enrollments".to_string())
            })?;

        self.slots[number.index()] = Some(Enrollment::new(course, grade));
        Ok(number)
    }

    /// Empty a slot and record why. Returns `None` when the slot is already empty.
    ///
    /// Callers check that the comment is not blank.
    pub fn remove_enrollment(
        &mut self,
        number: EnrollmentNumber,
        comment: &str,
    ) -> Option<Enrollment> {
        let removed = self.slots[number.index()].take()?;

        self.disenrollments.push(Disenrollment {
            course: removed.course.clone(),
            comment: comment.to_string(),
            disenrolled_at: Utc::now(),
        });

        Some(removed)
    }

    pub fn edit_personal_info(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.name = name.into();
        self.email = email.into();
    }

    /// Hand pending disenrollments to the repository that persists them
    pub fn take_disenrollments(&mut self) -> Vec<Disenrollment> {
        std::mem::take(&mut self.disenrollments)
    }
}
