use serde::{Deserialize, Serialize};

use super::assignment::Assignment;

/// Weekly teaching hours assumed when the backend omits `maxHours`.
pub const DEFAULT_MAX_HOURS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyInfo {
    pub code: String,
    pub name: String,
    pub department: String,
}

/// Teaching load summary for one faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workload {
    pub total_hours: u32,
    pub max_hours: u32,
    pub free_slots: u32,
    pub busy_slots: u32,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            total_hours: 0,
            max_hours: DEFAULT_MAX_HOURS,
            free_slots: 0,
            busy_slots: 0,
        }
    }
}

impl Workload {
    /// Share of the maximum load in use, as a percentage.
    ///
    /// Returns 0 when `max_hours` is 0. Not clamped: an overloaded member
    /// reports more than 100.
    pub fn utilization_percent(&self) -> f64 {
        if self.max_hours == 0 {
            return 0.0;
        }
        f64::from(self.total_hours) * 100.0 / f64::from(self.max_hours)
    }
}

/// Response of `GET /api/v1/faculty/{facultyCode}/schedule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultySchedule {
    pub faculty: FacultyInfo,
    #[serde(default)]
    pub schedule: Vec<Assignment>,
    #[serde(default)]
    pub workload: Workload,
}
