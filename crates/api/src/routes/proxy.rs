use axum::{routing::any, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route("/api/*path", any(handlers::proxy::forward))
}
