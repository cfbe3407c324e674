//! Query side
//!
//! Queries bypass the domain model and read flat rows through
//! `StudentListReader`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{StudentListReader, StudentRow};
use crate::error::DomainError;

#[async_trait]
pub trait QueryHandler<Q>: Send + Sync
where
    Q: Send + Sync,
{
    type Output;

    async fn handle(&self, query: &Q) -> Result<Self::Output, DomainError>;
}

/// List students, optionally filtered by course name and enrollment count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetListQuery {
    pub enrolled_in: Option<String>,
    pub number_of_courses: Option<i32>,
}

/// Listing projection returned by `GET /students`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub course1: Option<String>,
    pub course1_grade: Option<String>,
    pub course1_credits: Option<i32>,
    pub course2: Option<String>,
    pub course2_grade: Option<String>,
    pub course2_credits: Option<i32>,
}

impl From<StudentRow> for StudentDto {
    fn from(row: StudentRow) -> Self {
        StudentDto {
            id: row.id,
            name: row.name,
            email: row.email,
            course1: row.course1,
            course1_grade: row.course1_grade,
            course1_credits: row.course1_credits,
            course2: row.course2,
            course2_grade: row.course2_grade,
            course2_credits: row.course2_credits,
        }
    }
}

pub struct GetListQueryHandler<R: StudentListReader> {
    reader: Arc<R>,
}

impl<R: StudentListReader> GetListQueryHandler<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl<R: StudentListReader> QueryHandler<GetListQuery> for GetListQueryHandler<R> {
    type Output = Vec<StudentDto>;

    async fn handle(&self, query: &GetListQuery) -> Result<Vec<StudentDto>, DomainError> {
        // An empty filter means "no filter", as a blank query string does
        let enrolled_in = query.enrolled_in.as_deref().filter(|s| !s.is_empty());

        let rows = self
            .reader
            .list(enrolled_in, query.number_of_courses)
            .await?;

        tracing::debug!(count = rows.len(), "Students listed");
        Ok(rows.into_iter().map(StudentDto::from).collect())
    }
}
