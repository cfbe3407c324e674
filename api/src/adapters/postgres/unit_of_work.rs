//! PostgreSQL unit of work
//!
//! One `DatabaseTransaction` per command. SeaORM rolls the transaction back
//! when it is dropped uncommitted, so early returns discard staged writes.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::{PostgresCourseRepository, PostgresStudentRepository};
use crate::domain::ports::{CourseRepository, StudentRepository, UnitOfWork, UnitOfWorkFactory};
use crate::error::DomainError;

/// Opens transactions on the command connection
#[derive(Clone)]
pub struct PostgresUnitOfWorkFactory {
    db: DatabaseConnection,
}

impl PostgresUnitOfWorkFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWorkFactory for PostgresUnitOfWorkFactory {
    type UnitOfWork = PostgresUnitOfWork;

    async fn begin(&self) -> Result<PostgresUnitOfWork, DomainError> {
        let txn = self.db.begin().await?;
        Ok(PostgresUnitOfWork { txn })
    }
}

pub struct PostgresUnitOfWork {
    txn: DatabaseTransaction,
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    fn students(&self) -> Box<dyn StudentRepository + '_> {
        Box::new(PostgresStudentRepository::new(&self.txn))
    }

    fn courses(&self) -> Box<dyn CourseRepository + '_> {
        Box::new(PostgresCourseRepository::new(&self.txn))
    }

    async fn commit(self) -> Result<(), DomainError> {
        self.txn.commit().await?;
        Ok(())
    }
}
