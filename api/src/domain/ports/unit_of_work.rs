//! Unit of work port
//!
//! A unit of work is one transaction. Repositories obtained from it stage
//! their writes in that transaction; nothing is visible to other sessions
//! until `commit`. Dropping a unit of work without committing discards it.

use async_trait::async_trait;

use super::{CourseRepository, StudentRepository};
use crate::error::DomainError;

#[async_trait]
pub trait UnitOfWork: Send + Sync + Sized {
    fn students(&self) -> Box<dyn StudentRepository + '_>;

    fn courses(&self) -> Box<dyn CourseRepository + '_>;

    /// Finalize every staged change atomically
    async fn commit(self) -> Result<(), DomainError>;
}

/// Opens a fresh unit of work per command
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    type UnitOfWork: UnitOfWork;

    async fn begin(&self) -> Result<Self::UnitOfWork, DomainError>;
}
