//! PostgreSQL adapter for CourseRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter};

use crate::domain::entities::{Course, CourseId};
use crate::domain::ports::CourseRepository;
use crate::entity::courses;
use crate::error::DomainError;

/// PostgreSQL implementation of CourseRepository, bound to a transaction
pub struct PostgresCourseRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> PostgresCourseRepository<'a> {
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl CourseRepository for PostgresCourseRepository<'_> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Course>, DomainError> {
        let result = courses::Entity::find()
            .filter(courses::Column::Name.eq(name))
            .one(self.txn)
            .await?;

        Ok(result.map(|m| m.into()))
    }
}

/// Convert SeaORM model to domain entity
impl From<courses::Model> for Course {
    fn from(model: courses::Model) -> Self {
        Course {
            id: CourseId(model.id),
            name: model.name,
            credits: model.credits,
        }
    }
}
