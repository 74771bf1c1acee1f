//! # Timetable Source
//!
//! Access to the scheduling backend's read endpoints. Every response crosses
//! a parse-or-fail boundary here: a body that does not decode into the typed
//! model becomes [`KairoError::MalformedResponse`] and never reaches a
//! projector.

use async_trait::async_trait;
use kairo_core::{
    errors::{KairoError, KairoResult},
    models::{faculty::FacultySchedule, student::StudentTimetable},
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;

/// Read access to student timetables and faculty schedules.
#[async_trait]
pub trait TimetableSource: Send + Sync {
    async fn student_timetable(&self, enrollment_number: &str) -> KairoResult<StudentTimetable>;

    async fn faculty_schedule(&self, faculty_code: &str) -> KairoResult<FacultySchedule>;
}

/// Trims a search key and rejects it if nothing is left.
pub fn normalize_key(raw: &str, what: &str) -> KairoResult<String> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(KairoError::Validation(format!("{} must not be empty", what)));
    }
    Ok(key.to_string())
}

pub fn student_timetable_path(enrollment_number: &str) -> String {
    format!(
        "/api/v1/students/{}/timetable",
        urlencoding::encode(enrollment_number)
    )
}

pub fn faculty_schedule_path(faculty_code: &str) -> String {
    format!(
        "/api/v1/faculty/{}/schedule",
        urlencoding::encode(faculty_code)
    )
}

/// [`TimetableSource`] backed by the HTTP API.
#[derive(Debug, Clone)]
pub struct HttpTimetableSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTimetableSource {
    pub fn new(config: &ClientConfig) -> eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self::with_client(client, &config.api_base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> KairoResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| KairoError::Unreachable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| KairoError::Unreachable(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(KairoError::NotFound(error_message(&body, status)));
        }

        if !status.is_success() {
            warn!("Backend returned {} for {}", status, url);
            return Err(KairoError::Upstream {
                status: status.as_u16(),
                message: error_message(&body, status),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!("Rejected response from {}: {}", url, e);
            KairoError::MalformedResponse(e.to_string())
        })
    }
}

/// Pulls a readable message out of an error body.
///
/// The backend reports errors as `{"detail": ...}`, the gateway as
/// `{"error": ...}`; anything else falls back to the raw body or the status
/// reason.
fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl TimetableSource for HttpTimetableSource {
    async fn student_timetable(&self, enrollment_number: &str) -> KairoResult<StudentTimetable> {
        let key = normalize_key(enrollment_number, "Enrollment number")?;
        self.get_json(&student_timetable_path(&key)).await
    }

    async fn faculty_schedule(&self, faculty_code: &str) -> KairoResult<FacultySchedule> {
        let key = normalize_key(faculty_code, "Faculty code")?;
        self.get_json(&faculty_schedule_path(&key)).await
    }
}
