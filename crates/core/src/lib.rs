//! # Kairo Core
//!
//! Shared domain types for the Kairo timetable portal: the assignment and
//! schedule models received from the scheduling backend, the error type used
//! across the workspace, and the grid projector that turns a flat assignment
//! list into day and week views.

/// Error types shared by every crate in the workspace
pub mod errors;
/// Data received from the scheduling backend
pub mod models;
/// Projection of assignments into day and week views
pub mod projector;

pub use errors::{KairoError, KairoResult};
