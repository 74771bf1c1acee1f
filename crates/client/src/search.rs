//! # Search Controller
//!
//! Runs lookups by enrollment number or faculty code and keeps the result
//! the portal displays. A search settles exactly once: either its result is
//! applied, or it was superseded by a newer search and is discarded.
//!
//! What happens when a search is issued while another is still in flight is
//! decided by [`SearchPolicy`]:
//!
//! - [`SearchPolicy::LastResponseWins`]: the new search supersedes the old
//!   one. Whatever the old one returns, and whenever it returns it, is
//!   dropped.
//! - [`SearchPolicy::IgnoreOverlapping`]: the new search is refused and the
//!   in-flight one carries on.

use kairo_core::{
    errors::{KairoError, KairoResult},
    models::{faculty::FacultySchedule, student::StudentTimetable},
};
use std::{fmt, future::Future, str::FromStr, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::source::TimetableSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPolicy {
    #[default]
    LastResponseWins,
    IgnoreOverlapping,
}

impl FromStr for SearchPolicy {
    type Err = KairoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-response-wins" | "last_response_wins" => Ok(SearchPolicy::LastResponseWins),
            "ignore-overlapping" | "ignore_overlapping" => Ok(SearchPolicy::IgnoreOverlapping),
            other => Err(KairoError::Validation(format!("Unknown search policy '{}'", other))),
        }
    }
}

impl fmt::Display for SearchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchPolicy::LastResponseWins => f.write_str("last-response-wins"),
            SearchPolicy::IgnoreOverlapping => f.write_str("ignore-overlapping"),
        }
    }
}

/// Handle for one admitted search, needed to complete it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    pub id: Uuid,
    generation: u64,
}

#[derive(Debug, Clone)]
pub enum SearchState<T> {
    Idle,
    Searching { query: String },
    Loaded { query: String, data: Arc<T> },
    Failed { query: String, error: Arc<KairoError> },
}

impl<T> SearchState<T> {
    pub fn is_searching(&self) -> bool {
        matches!(self, SearchState::Searching { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            SearchState::Loaded { data, .. } => Some(data.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&KairoError> {
        match self {
            SearchState::Failed { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}

/// Result of asking to start a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Started(SearchTicket),
    /// The query was empty after trimming; nothing changed.
    Blank,
    /// Another search is in flight and the policy refuses overlap.
    Busy,
}

/// How a search ended from the caller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Loaded,
    Failed,
    Superseded,
    Busy,
    Blank,
}

struct Inner<T> {
    state: SearchState<T>,
    generation: u64,
    in_flight: Option<SearchTicket>,
}

pub struct SearchController<T> {
    policy: SearchPolicy,
    inner: RwLock<Inner<T>>,
}

pub type StudentSearch = SearchController<StudentTimetable>;
pub type FacultySearch = SearchController<FacultySchedule>;

impl<T: Clone> SearchController<T> {
    pub fn new(policy: SearchPolicy) -> Self {
        Self {
            policy,
            inner: RwLock::new(Inner {
                state: SearchState::Idle,
                generation: 0,
                in_flight: None,
            }),
        }
    }

    pub fn policy(&self) -> SearchPolicy {
        self.policy
    }

    pub async fn state(&self) -> SearchState<T> {
        self.inner.read().await.state.clone()
    }

    /// Admits a search for `query` under the configured policy.
    pub async fn begin(&self, query: &str) -> Admission {
        let query = query.trim();
        if query.is_empty() {
            return Admission::Blank;
        }

        let mut inner = self.inner.write().await;
        if inner.in_flight.is_some() && self.policy == SearchPolicy::IgnoreOverlapping {
            debug!("Ignoring search for '{}' while another is in flight", query);
            return Admission::Busy;
        }

        inner.generation += 1;
        let ticket = SearchTicket {
            id: Uuid::new_v4(),
            generation: inner.generation,
        };
        inner.in_flight = Some(ticket);
        inner.state = SearchState::Searching {
            query: query.to_string(),
        };

        info!(search_id = %ticket.id, "Searching for '{}'", query);
        Admission::Started(ticket)
    }

    /// Settles an admitted search.
    ///
    /// Only the most recently admitted search can change the state; any
    /// other ticket is reported as superseded and its result dropped.
    pub async fn complete(&self, ticket: SearchTicket, result: KairoResult<T>) -> SearchOutcome {
        let mut inner = self.inner.write().await;

        if inner.in_flight != Some(ticket) {
            debug!(search_id = %ticket.id, "Discarding superseded search result");
            return SearchOutcome::Superseded;
        }
        inner.in_flight = None;

        let query = match &inner.state {
            SearchState::Searching { query } => query.clone(),
            _ => String::new(),
        };

        match result {
            Ok(data) => {
                info!(search_id = %ticket.id, "Search for '{}' loaded", query);
                inner.state = SearchState::Loaded {
                    query,
                    data: Arc::new(data),
                };
                SearchOutcome::Loaded
            }
            Err(e) => {
                error!(
                    search_id = %ticket.id,
                    kind = e.kind(),
                    "Search for '{}' failed: {}",
                    query,
                    e
                );
                inner.state = SearchState::Failed {
                    query,
                    error: Arc::new(e),
                };
                SearchOutcome::Failed
            }
        }
    }

    /// Admits, runs and settles a search in one go.
    pub async fn search<F, Fut>(&self, query: &str, fetch: F) -> SearchOutcome
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = KairoResult<T>>,
    {
        let ticket = match self.begin(query).await {
            Admission::Started(ticket) => ticket,
            Admission::Blank => return SearchOutcome::Blank,
            Admission::Busy => return SearchOutcome::Busy,
        };

        let result = fetch(query.trim().to_string()).await;
        self.complete(ticket, result).await
    }

    /// Drops the displayed result and returns to the search form.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        inner.in_flight = None;
        inner.state = SearchState::Idle;
    }
}

impl SearchController<StudentTimetable> {
    pub async fn search_student(
        &self,
        source: &dyn TimetableSource,
        enrollment_number: &str,
    ) -> SearchOutcome {
        self.search(enrollment_number, |key| async move {
            source.student_timetable(&key).await
        })
        .await
    }
}

impl SearchController<FacultySchedule> {
    pub async fn search_faculty(
        &self,
        source: &dyn TimetableSource,
        faculty_code: &str,
    ) -> SearchOutcome {
        self.search(faculty_code, |key| async move {
            source.faculty_schedule(&key).await
        })
        .await
    }
}
