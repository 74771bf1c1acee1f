/// Projected timetable views for the portal pages
pub mod portal;
/// Rewrite of every `/api/*` request to the scheduling backend
pub mod proxy;
