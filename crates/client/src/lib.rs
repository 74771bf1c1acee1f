//! # Kairo Client
//!
//! Everything a portal front end needs besides the projector itself: typed
//! access to the scheduling backend, search handling with an explicit policy
//! for overlapping lookups, the install prompt with its dismissal reminder,
//! and plain-text rendering of projected views.

pub mod config;
pub mod install_prompt;
pub mod mock;
pub mod render;
pub mod search;
pub mod source;

pub use config::ClientConfig;
pub use search::{SearchController, SearchOutcome, SearchPolicy, SearchState};
pub use source::{HttpTimetableSource, TimetableSource};
