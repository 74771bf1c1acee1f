use serde::{Deserialize, Serialize};
use std::fmt;

/// Days a time slot may fall on.
///
/// The backend's day enumeration includes Sunday, but the teaching week
/// rendered by the portal is Monday to Saturday. See [`TEACHING_WEEK`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical ordered teaching week, one grid column per entry.
pub const TEACHING_WEEK: [Day; 6] = [
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
    Day::Saturday,
];

/// The canonical ordered hourly periods, one grid row per entry.
pub const TIME_SLOTS: [&str; 8] = [
    "09:00-10:00",
    "10:00-11:00",
    "11:00-12:00",
    "12:00-13:00",
    "13:00-14:00",
    "14:00-15:00",
    "15:00-16:00",
    "16:00-17:00",
];

/// Neutral style used for any course type the portal does not recognise.
pub const NEUTRAL_STYLE: &str = "bg-gray-200 text-black";

/// Pedagogical category of a course.
///
/// Only affects styling. Values outside the known set are kept verbatim in
/// [`CourseType::Other`] so that a new category on the backend never breaks
/// decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CourseType {
    Major,
    Minor,
    Lab,
    Sec,
    Aec,
    Vac,
    Other(String),
}

impl CourseType {
    /// Known course types in legend order.
    pub const KNOWN: [CourseType; 6] = [
        CourseType::Major,
        CourseType::Minor,
        CourseType::Lab,
        CourseType::Sec,
        CourseType::Aec,
        CourseType::Vac,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CourseType::Major => "Major",
            CourseType::Minor => "Minor",
            CourseType::Lab => "Lab",
            CourseType::Sec => "SEC",
            CourseType::Aec => "AEC",
            CourseType::Vac => "VAC",
            CourseType::Other(raw) => raw,
        }
    }

    /// Human-readable legend label.
    pub fn label(&self) -> &str {
        match self {
            CourseType::Major => "Major Courses",
            CourseType::Minor => "Minor Courses",
            CourseType::Lab => "Laboratory",
            CourseType::Sec => "Skill Enhancement",
            CourseType::Aec => "Ability Enhancement",
            CourseType::Vac => "Value Added",
            CourseType::Other(raw) => raw,
        }
    }

    /// Visual class for cards of this type, falling back to [`NEUTRAL_STYLE`].
    pub fn style_class(&self) -> &'static str {
        match self {
            CourseType::Major => "course-major",
            CourseType::Minor => "course-minor",
            CourseType::Lab => "course-lab",
            CourseType::Sec => "course-sec",
            CourseType::Aec => "course-aec",
            CourseType::Vac => "course-vac",
            CourseType::Other(_) => NEUTRAL_STYLE,
        }
    }
}

impl From<String> for CourseType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Major" => CourseType::Major,
            "Minor" => CourseType::Minor,
            "Lab" => CourseType::Lab,
            "SEC" => CourseType::Sec,
            "AEC" => CourseType::Aec,
            "VAC" => CourseType::Vac,
            _ => CourseType::Other(raw),
        }
    }
}

impl From<&str> for CourseType {
    fn from(raw: &str) -> Self {
        CourseType::from(raw.to_string())
    }
}

impl From<CourseType> for String {
    fn from(course_type: CourseType) -> Self {
        match course_type {
            CourseType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    /// Position among [`TIME_SLOTS`]. Trusted as sent by the backend.
    pub slot_index: usize,
}

/// One scheduled course occurrence at a specific day, slot, room and faculty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub course_code: String,
    pub course_title: String,
    pub room_number: String,
    pub branch: String,
    pub faculty_short_form: String,
    pub course_type: CourseType,
    pub time_slot: TimeSlot,
}
