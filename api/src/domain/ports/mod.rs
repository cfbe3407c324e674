//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod queries;
pub mod repositories;
pub mod unit_of_work;

pub use queries::{StudentListReader, StudentRow};
pub use repositories::{CourseRepository, StudentRepository};
pub use unit_of_work::{UnitOfWork, UnitOfWorkFactory};
