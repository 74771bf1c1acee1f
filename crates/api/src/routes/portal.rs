use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/portal/students/:enrollment_number/timetable",
            get(handlers::portal::student_timetable),
        )
        .route(
            "/portal/faculty/:faculty_code/schedule",
            get(handlers::portal::faculty_schedule),
        )
}
