//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod students;

pub use students::{
    disenroll, edit_personal_info, enroll, list_students, register, transfer, unregister,
};
