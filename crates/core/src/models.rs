/// Course assignments and the canonical week they are placed on
pub mod assignment;
/// Faculty schedule and workload summary
pub mod faculty;
/// Student timetable payload
pub mod student;
