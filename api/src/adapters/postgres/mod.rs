//! PostgreSQL adapters
//!
//! Implementations of the persistence ports using SeaORM and PostgreSQL.

pub mod course_repo;
pub mod student_list_reader;
pub mod student_repo;
pub mod unit_of_work;


pub use course_repo::PostgresCourseRepository;
pub use student_list_reader::PostgresStudentListReader;
pub use student_repo::PostgresStudentRepository;
pub use unit_of_work::PostgresUnitOfWorkFactory;
