//! Enrollment domain entity
//!
//! An enrollment lives in one of a student's two slots. The slot is its
//! enrollment number, which callers use to address it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Course, Grade};

/// Slot an enrollment occupies (1 or 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EnrollmentNumber {
    First,
    Second,
}

impl EnrollmentNumber {
    pub const ALL: [EnrollmentNumber; 2] = [EnrollmentNumber::First, EnrollmentNumber::Second];

    /// Parse an external ordinal; anything other than 1 or 2 addresses nothing
    pub fn from_ordinal(n: i32) -> Option<Self> {
        match n {
            1 => Some(EnrollmentNumber::First),
            2 => Some(EnrollmentNumber::Second),
            _ => None,
        }
    }

    pub fn ordinal(self) -> i32 {
        match self {
            EnrollmentNumber::First => 1,
            EnrollmentNumber::Second => 2,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            EnrollmentNumber::First => 0,
            EnrollmentNumber::Second => 1,
        }
    }
}

impl std::fmt::Display for EnrollmentNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ordinal())
    }
}

/// A student's enrollment in a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrollment {
    pub course: Course,
    pub grade: Grade,
}

impl Enrollment {
    pub fn new(course: Course, grade: Grade) -> Self {
        Self { course, grade }
    }

    /// Replace course and grade in place (transfer)
    pub fn update(&mut self, course: Course, grade: Grade) {
        self.course = course;
        self.grade = grade;
    }
}

/// Audit record left behind when an enrollment is removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disenrollment {
    pub course: Course,
    pub comment: String,
    pub disenrolled_at: DateTime<Utc>,
}
