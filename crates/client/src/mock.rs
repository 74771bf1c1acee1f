use async_trait::async_trait;
use kairo_core::{
    errors::KairoResult,
    models::{faculty::FacultySchedule, student::StudentTimetable},
};
use mockall::mock;

use crate::source::TimetableSource;

// Mock backend for testing
mock! {
    pub TimetableSource {}

    #[async_trait]
    impl TimetableSource for TimetableSource {
        async fn student_timetable(&self, enrollment_number: &str) -> KairoResult<StudentTimetable>;

        async fn faculty_schedule(&self, faculty_code: &str) -> KairoResult<FacultySchedule>;
    }
}
