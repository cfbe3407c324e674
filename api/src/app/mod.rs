//! Application layer
//!
//! Command handlers, the list query, decorators and the dispatcher that
//! ties them together.

pub mod commands;
pub mod decorators;
pub mod messages;
pub mod queries;

pub use commands::{
    DisenrollCommand, EditPersonalInfoCommand, EnrollCommand, RegisterCommand, TransferCommand,
    UnregisterCommand,
};
pub use decorators::RetryPolicy;
pub use messages::Messages;
pub use queries::{GetListQuery, StudentDto};
