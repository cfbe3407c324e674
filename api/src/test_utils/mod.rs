//! Test utilities
//!
//! In-memory port implementations and test fixtures for unit testing.
//!
//! The in-memory unit of work hands out borrowed repositories and stages
//! writes until commit, so tests assert on committed state directly.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
