//! Student handlers
//!
//! Each endpoint turns its request into a command or query and hands it to
//! the dispatcher. Business failures come back as `AppError` responses.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::app::{
    DisenrollCommand, EditPersonalInfoCommand, EnrollCommand, GetListQuery, RegisterCommand,
    StudentDto, TransferCommand, UnregisterCommand,
};
use crate::error::AppError;
use crate::AppState;

/// Query string for listing students
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Course name; matches either enrollment slot
    pub enrolled: Option<String>,
    /// Exact number of enrollments. Kept as text: blank or non-numeric means no filter
    pub number: Option<String>,
}

impl ListParams {
    fn into_query(self) -> GetListQuery {
        GetListQuery {
            enrolled_in: self.enrolled,
            number_of_courses: self.number.and_then(|n| n.trim().parse().ok()),
        }
    }
}

/// Request body for registering a student
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub course1: Option<String>,
    pub course1_grade: Option<String>,
    pub course2: Option<String>,
    pub course2_grade: Option<String>,
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(r: RegisterRequest) -> Self {
        RegisterCommand {
            name: r.name,
            email: r.email,
            course1: r.course1,
            course1_grade: r.course1_grade,
            course2: r.course2,
            course2_grade: r.course2_grade,
        }
    }
}

/// Request body for enrolling in or transferring to a course
#[derive(Debug, Deserialize)]
pub struct EnrollmentRequest {
    pub course: String,
    pub grade: String,
}

/// Request body for removing an enrollment
#[derive(Debug, Default, Deserialize)]
pub struct DisenrollRequest {
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PersonalInfoRequest {
    pub name: String,
    pub email: String,
}

/// GET /students?enrolled=&number=
pub async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<StudentDto>>, AppError> {
    let students = state.messages.query(&params.into_query()).await?;
    Ok(Json(students))
}

/// POST /students
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<StatusCode, AppError> {
    state
        .messages
        .dispatch(RegisterCommand::from(request))
        .await?;
    Ok(StatusCode::OK)
}

/// DELETE /students/:id
pub async fn unregister(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.messages.dispatch(UnregisterCommand { id }).await?;
    Ok(StatusCode::OK)
}

/// POST /students/:id/enrollments
pub async fn enroll(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<EnrollmentRequest>,
) -> Result<StatusCode, AppError> {
    state
        .messages
        .dispatch(EnrollCommand {
            id,
            course: request.course,
            grade: request.grade,
        })
        .await?;
    Ok(StatusCode::OK)
}

/// PUT /students/:id/enrollments/:number
pub async fn transfer(
    State(state): State<AppState>,
    Path((id, enrollment_number)): Path<(i64, i32)>,
    Json(request): Json<EnrollmentRequest>,
) -> Result<StatusCode, AppError> {
    state
        .messages
        .dispatch(TransferCommand {
            id,
            enrollment_number,
            course: request.course,
            grade: request.grade,
        })
        .await?;
    Ok(StatusCode::OK)
}

/// POST /students/:id/enrollments/:number/deletion
///
/// A missing comment is treated as blank and rejected by the handler.
pub async fn disenroll(
    State(state): State<AppState>,
    Path((id, enrollment_number)): Path<(i64, i32)>,
    Json(request): Json<DisenrollRequest>,
) -> Result<StatusCode, AppError> {
    state
        .messages
        .dispatch(DisenrollCommand {
            id,
            enrollment_number,
            comment: request.comment.unwrap_or_default(),
        })
        .await?;
    Ok(StatusCode::OK)
}

/// PUT /students/:id
pub async fn edit_personal_info(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<PersonalInfoRequest>,
) -> Result<StatusCode, AppError> {
    state
        .messages
        .dispatch(EditPersonalInfoCommand {
            id,
            name: request.name,
            email: request.email,
        })
        .await?;
    Ok(StatusCode::OK)
}
