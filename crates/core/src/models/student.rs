use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::assignment::Assignment;

/// Faculty short form to full display name.
///
/// Ordered by short form so every rendering of the legend is identical.
pub type FacultyLegend = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub name: String,
    pub program: String,
    pub semester: u32,
}

/// Response of `GET /api/v1/students/{enrollmentNumber}/timetable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentTimetable {
    pub student: StudentInfo,
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub faculty_legend: FacultyLegend,
}
