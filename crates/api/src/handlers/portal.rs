//! # Portal Handlers
//!
//! Serve the student and faculty pages' data already projected into the
//! requested view, so a front end only has to lay out cells and lists.
//!
//! The backend response is decoded through the typed source first; anything
//! that does not match the expected shape is reported as a gateway error
//! instead of being projected.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use kairo_core::{
    models::{
        faculty::{FacultyInfo, Workload},
        student::{FacultyLegend, StudentInfo},
    },
    projector::{self, TimetableView, ViewMode},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters shared by the portal endpoints
///
/// * `view` - `week` (default) or `day`
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub view: Option<String>,
}

impl ViewQuery {
    pub fn mode(&self) -> Result<ViewMode, AppError> {
        match &self.view {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(ViewMode::default()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPortalResponse {
    pub student: StudentInfo,
    pub timetable: TimetableView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyPortalResponse {
    pub faculty: FacultyInfo,
    pub workload: Workload,
    pub utilization_percent: f64,
    pub timetable: TimetableView,
}

pub async fn student_timetable(
    State(state): State<Arc<ApiState>>,
    Path(enrollment_number): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<StudentPortalResponse>, AppError> {
    let mode = query.mode()?;
    let timetable = state.source.student_timetable(&enrollment_number).await?;

    info!(
        "Projecting {} assignments for {} as {:?} view",
        timetable.assignments.len(),
        enrollment_number,
        mode
    );

    let view = projector::project(Some(&timetable), mode);
    Ok(Json(StudentPortalResponse {
        student: timetable.student,
        timetable: view,
    }))
}

pub async fn faculty_schedule(
    State(state): State<Arc<ApiState>>,
    Path(faculty_code): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<FacultyPortalResponse>, AppError> {
    let mode = query.mode()?;
    let schedule = state.source.faculty_schedule(&faculty_code).await?;

    let legend = FacultyLegend::new();
    let view = match mode {
        ViewMode::Week => {
            TimetableView::Week(projector::project_week_view(&schedule.schedule, &legend))
        }
        ViewMode::Day => {
            TimetableView::Day(projector::project_day_view(&schedule.schedule, &legend))
        }
    };

    Ok(Json(FacultyPortalResponse {
        utilization_percent: schedule.workload.utilization_percent(),
        faculty: schedule.faculty,
        workload: schedule.workload,
        timetable: view,
    }))
}
