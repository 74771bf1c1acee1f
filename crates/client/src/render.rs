//! Plain-text rendering of projected views for terminal output.

use kairo_core::{
    models::{faculty::FacultySchedule, student::StudentInfo},
    projector::{DayView, GridCard, LegendEntry, TimetableView, WeekView},
};
use std::fmt::Write;

const TIME_COLUMN: &str = "Time";

/// Width in characters, which is what `{:<width$}` pads by.
fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn card_text(card: &GridCard) -> String {
    format!(
        "{} {} {}",
        card.course_code, card.room_number, card.faculty_short_form
    )
}

fn render_legend(out: &mut String, legend: &[LegendEntry]) {
    out.push_str("\nFaculty Legend\n");
    for entry in legend {
        let _ = writeln!(out, "  {}: {}", entry.short_form, entry.full_name);
    }
}

pub fn render_student_header(student: &StudentInfo) -> String {
    format!(
        "{} | {} | Semester {}\n",
        student.name, student.program, student.semester
    )
}

pub fn render_week(view: &WeekView) -> String {
    let cells: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| cell.as_ref().map(card_text).unwrap_or_default())
                .collect()
        })
        .collect();

    let time_width = view
        .rows
        .iter()
        .map(|row| display_width(row.time_slot))
        .chain(std::iter::once(display_width(TIME_COLUMN)))
        .max()
        .unwrap_or(0);

    let column_widths: Vec<usize> = view
        .days
        .iter()
        .enumerate()
        .map(|(column, day)| {
            cells
                .iter()
                .filter_map(|row| row.get(column))
                .map(|cell| display_width(cell))
                .chain(std::iter::once(display_width(day.as_str())))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:<width$}", TIME_COLUMN, width = time_width);
    for (day, width) in view.days.iter().zip(&column_widths) {
        let _ = write!(out, " | {:<width$}", day.as_str(), width = *width);
    }
    out.push('\n');

    for (row, row_cells) in view.rows.iter().zip(&cells) {
        let _ = write!(out, "{:<width$}", row.time_slot, width = time_width);
        for (text, width) in row_cells.iter().zip(&column_widths) {
            let _ = write!(out, " | {:<width$}", text, width = *width);
        }
        out.push('\n');
    }

    out.push_str("\nCourse Types\n");
    for entry in &view.course_types {
        let _ = writeln!(out, "  {}: {}", entry.course_type, entry.label);
    }

    render_legend(&mut out, &view.faculty_legend);

    for collision in &view.collisions {
        let _ = writeln!(
            out,
            "warning: {} hidden behind {} on {} slot {}",
            collision.hidden, collision.shown, collision.day, collision.slot_index
        );
    }

    out
}

pub fn render_day(view: &DayView) -> String {
    let mut out = String::new();

    for block in &view.days {
        let _ = writeln!(out, "{}", block.day);
        for entry in &block.entries {
            let _ = writeln!(out, "  {}", entry.title);
            let _ = writeln!(out, "    {}", entry.detail);
        }
    }

    render_legend(&mut out, &view.faculty_legend);
    out
}

pub fn render_view(view: &TimetableView) -> String {
    match view {
        TimetableView::NoData { message } => format!("{}\n", message),
        TimetableView::Day(day) => render_day(day),
        TimetableView::Week(week) => render_week(week),
    }
}

/// Faculty header with workload summary followed by the schedule grid.
pub fn render_faculty(schedule: &FacultySchedule, week: &WeekView) -> String {
    let workload = &schedule.workload;
    let mut out = format!(
        "{} ({}) | {}\n",
        schedule.faculty.name, schedule.faculty.code, schedule.faculty.department
    );
    let _ = writeln!(
        out,
        "Workload: {} / {} hrs ({:.0}%) | Free slots: {} | Busy slots: {}\n",
        workload.total_hours,
        workload.max_hours,
        workload.utilization_percent(),
        workload.free_slots,
        workload.busy_slots
    );
    out.push_str(&render_week(week));
    out
}
