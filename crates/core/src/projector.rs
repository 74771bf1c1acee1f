//! # Grid Projector
//!
//! Turns the flat assignment list of a timetable into one of two views:
//!
//! - **Day view**: assignments grouped per teaching day, in arrival order.
//!   Days without assignments are left out.
//! - **Week view**: a fixed matrix with one row per entry of [`TIME_SLOTS`]
//!   and one column per entry of [`TEACHING_WEEK`], always 48 cells.
//!
//! Both views carry the faculty legend. Projection is pure: the same input
//! always yields the same output, and nothing in the input can make it fail.
//!
//! ## Collisions
//!
//! The backend should never place two assignments on the same
//! `(day, slotIndex)` pair. When it does, the week view keeps the first one
//! in input order and lists the others in [`WeekView::collisions`].

use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::str::FromStr;

use crate::errors::KairoError;
use crate::models::assignment::{Assignment, CourseType, Day, TEACHING_WEEK, TIME_SLOTS};
use crate::models::student::{FacultyLegend, StudentTimetable};

/// Separator between the fields of a day-view detail line.
pub const DETAIL_SEPARATOR: &str = " • ";

/// Placeholder shown when there is no timetable to project.
pub const NO_DATA_MESSAGE: &str = "No timetable data available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Week,
    Day,
}

impl FromStr for ViewMode {
    type Err = KairoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            other => Err(KairoError::Validation(format!(
                "Unknown view mode '{}', expected 'week' or 'day'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub short_form: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseTypeLegendEntry {
    pub course_type: String,
    pub label: String,
    pub style_class: &'static str,
}

/// One assignment as listed under its day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    /// `"{courseCode} - {courseTitle}"`
    pub title: String,
    /// `"{startTime}-{endTime} • {room} • {facultyShortForm}"`
    pub detail: String,
    pub style_class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBlock {
    pub day: Day,
    pub entries: Vec<DayEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub days: Vec<DayBlock>,
    pub faculty_legend: Vec<LegendEntry>,
}

/// Compact card placed in a week-view cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCard {
    pub course_code: String,
    pub room_number: String,
    pub faculty_short_form: String,
    pub style_class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub time_slot: &'static str,
    /// One cell per day of [`TEACHING_WEEK`], in order.
    pub cells: Vec<Option<GridCard>>,
}

/// An assignment hidden because an earlier one holds the same cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCollision {
    pub day: Day,
    pub slot_index: usize,
    pub shown: String,
    pub hidden: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekView {
    pub days: Vec<Day>,
    pub rows: Vec<GridRow>,
    pub course_types: Vec<CourseTypeLegendEntry>,
    pub faculty_legend: Vec<LegendEntry>,
    pub collisions: Vec<SlotCollision>,
}

impl WeekView {
    /// Card at the given column day and row index, if any.
    pub fn cell(&self, day: Day, slot_index: usize) -> Option<&GridCard> {
        let column = self.days.iter().position(|d| *d == day)?;
        self.rows.get(slot_index)?.cells.get(column)?.as_ref()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }

    pub fn occupied_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.is_some())
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum TimetableView {
    NoData { message: String },
    Day(DayView),
    Week(WeekView),
}

/// Style class for a course type. Unknown types get the neutral style.
pub fn style_class(course_type: &CourseType) -> &'static str {
    course_type.style_class()
}

fn legend_entries(legend: &FacultyLegend) -> Vec<LegendEntry> {
    legend
        .iter()
        .map(|(short_form, full_name)| LegendEntry {
            short_form: short_form.clone(),
            full_name: full_name.clone(),
        })
        .collect()
}

fn course_type_legend() -> Vec<CourseTypeLegendEntry> {
    CourseType::KNOWN
        .iter()
        .map(|course_type| CourseTypeLegendEntry {
            course_type: course_type.as_str().to_string(),
            label: course_type.label().to_string(),
            style_class: course_type.style_class(),
        })
        .collect()
}

fn day_entry(assignment: &Assignment) -> DayEntry {
    let slot = &assignment.time_slot;
    DayEntry {
        title: format!("{} - {}", assignment.course_code, assignment.course_title),
        detail: [
            format!("{}-{}", slot.start_time, slot.end_time),
            assignment.room_number.clone(),
            assignment.faculty_short_form.clone(),
        ]
        .join(DETAIL_SEPARATOR),
        style_class: assignment.course_type.style_class(),
    }
}

fn grid_card(assignment: &Assignment) -> GridCard {
    GridCard {
        course_code: assignment.course_code.clone(),
        room_number: assignment.room_number.clone(),
        faculty_short_form: assignment.faculty_short_form.clone(),
        style_class: assignment.course_type.style_class(),
    }
}

/// Groups assignments by teaching day, keeping arrival order within a day.
pub fn project_day_view(assignments: &[Assignment], legend: &FacultyLegend) -> DayView {
    let days = TEACHING_WEEK
        .iter()
        .filter_map(|&day| {
            let entries: Vec<DayEntry> = assignments
                .iter()
                .filter(|a| a.time_slot.day == day)
                .map(day_entry)
                .collect();

            if entries.is_empty() {
                None
            } else {
                Some(DayBlock { day, entries })
            }
        })
        .collect();

    DayView {
        days,
        faculty_legend: legend_entries(legend),
    }
}

/// Places assignments on the fixed slot × day grid.
pub fn project_week_view(assignments: &[Assignment], legend: &FacultyLegend) -> WeekView {
    let mut index: HashMap<(Day, usize), &Assignment> = HashMap::new();
    let mut collisions = Vec::new();

    for assignment in assignments {
        let slot = &assignment.time_slot;
        if !TEACHING_WEEK.contains(&slot.day) || slot.slot_index >= TIME_SLOTS.len() {
            continue;
        }

        match index.entry((slot.day, slot.slot_index)) {
            Entry::Vacant(vacant) => {
                vacant.insert(assignment);
            }
            Entry::Occupied(occupied) => collisions.push(SlotCollision {
                day: slot.day,
                slot_index: slot.slot_index,
                shown: occupied.get().course_code.clone(),
                hidden: assignment.course_code.clone(),
            }),
        }
    }

    let rows = TIME_SLOTS
        .iter()
        .enumerate()
        .map(|(slot_index, &time_slot)| GridRow {
            time_slot,
            cells: TEACHING_WEEK
                .iter()
                .map(|&day| index.get(&(day, slot_index)).map(|a| grid_card(a)))
                .collect(),
        })
        .collect();

    WeekView {
        days: TEACHING_WEEK.to_vec(),
        rows,
        course_types: course_type_legend(),
        faculty_legend: legend_entries(legend),
        collisions,
    }
}

/// Projects a student timetable into the requested view.
///
/// An absent timetable yields [`TimetableView::NoData`].
pub fn project(data: Option<&StudentTimetable>, mode: ViewMode) -> TimetableView {
    let Some(timetable) = data else {
        return TimetableView::NoData {
            message: NO_DATA_MESSAGE.to_string(),
        };
    };

    match mode {
        ViewMode::Day => TimetableView::Day(project_day_view(
            &timetable.assignments,
            &timetable.faculty_legend,
        )),
        ViewMode::Week => TimetableView::Week(project_week_view(
            &timetable.assignments,
            &timetable.faculty_legend,
        )),
    }
}
