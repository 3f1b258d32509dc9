use axum::Json;
use axum::extract::State;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ApiError;
use crate::server::AppState;
use crate::server::extract::JsonOrForm;
use crate::server::static_ui;
use crate::services::{
    DashboardStats, DepartmentService, EnrollmentService, FacultyService, NewFaculty, NewStudent,
    StatsService, StudentService,
};

#[derive(Debug, Serialize)]
pub struct Created {
    pub message: &'static str,
    pub id: i32,
}

/// Wraps list payloads as `{ "data": [...] }`.
#[derive(Debug, Serialize)]
pub struct DataList<T> {
    pub data: Vec<T>,
}

pub async fn create_student(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<NewStudent>,
) -> Result<Json<Created>, ApiError> {
    let id = StudentService::create(&state.db, body).await?;
    Ok(Json(Created {
        message: "Student created successfully",
        id,
    }))
}

pub async fn create_faculty(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<NewFaculty>,
) -> Result<Json<Created>, ApiError> {
    let id = FacultyService::create(&state.db, body).await?;
    Ok(Json(Created {
        message: "Faculty created successfully",
        id,
    }))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(StatsService::dashboard(&state.db).await?))
}

pub async fn recent_enrollments(State(state): State<AppState>) -> Result<Response, ApiError> {
    let data = EnrollmentService::recent(&state.db).await?;
    Ok(Json(DataList { data }).into_response())
}

pub async fn list_departments(State(state): State<AppState>) -> Result<Response, ApiError> {
    let data = DepartmentService::list(&state.db).await?;
    Ok(Json(DataList { data }).into_response())
}

pub async fn api_route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Anything the router did not match: unknown API paths get a JSON 404,
/// every other path is a front-end route and gets the application shell.
pub async fn fallback(State(state): State<AppState>, uri: Uri) -> Response {
    if uri.path().starts_with("/api") {
        return ApiError::RouteNotFound.into_response();
    }
    static_ui::serve(&state.static_dir, uri.path()).await
}
