//! PostgreSQL adapter for StudentListReader
//!
//! Plain SQL over the denormalized student columns; no aggregates are loaded.

use async_trait::async_trait;
use sea_orm::{DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};

use crate::domain::ports::{StudentListReader, StudentRow};
use crate::error::DomainError;

const LIST_STUDENTS_SQL: &str = r#"
    SELECT s.id, s.name, s.email,
        s.first_course_name AS course1,
        s.first_course_credits AS course1_credits,
        s.first_course_grade AS course1_grade,
        s.second_course_name AS course2,
        s.second_course_credits AS course2_credits,
        s.second_course_grade AS course2_grade
    FROM students s
    WHERE (s.first_course_name = $1
            OR s.second_course_name = $1
            OR $1::text IS NULL)
        AND (s.number_of_enrollments = $2
            OR $2::integer IS NULL)
    ORDER BY s.id ASC"#;

/// PostgreSQL implementation of StudentListReader, on the queries connection
pub struct PostgresStudentListReader {
    db: DatabaseConnection,
}

impl PostgresStudentListReader {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct StudentListRow {
    id: i64,
    name: String,
    email: String,
    course1: Option<String>,
    course1_credits: Option<i32>,
    course1_grade: Option<String>,
    course2: Option<String>,
    course2_credits: Option<i32>,
    course2_grade: Option<String>,
}

#[async_trait]
impl StudentListReader for PostgresStudentListReader {
    async fn list(
        &self,
        enrolled_in: Option<&str>,
        number_of_courses: Option<i32>,
    ) -> Result<Vec<StudentRow>, DomainError> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            LIST_STUDENTS_SQL,
            [
                enrolled_in.map(str::to_string).into(),
                number_of_courses.into(),
            ],
        );

        let rows = StudentListRow::find_by_statement(stmt)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

impl From<StudentListRow> for StudentRow {
    fn from(row: StudentListRow) -> Self {
        StudentRow {
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
