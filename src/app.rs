use std::path::Path;

use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{domains::contact::rest::contact_routes, state::SharedAppState};

/// Builds the router. When `static_dir` is set, paths outside `/api` are served from it.
pub fn create_app(state: SharedAppState, static_dir: Option<&Path>) -> Router {
  let router = Router::new().nest("/api", contact_routes());

  let router = match static_dir {
    Some(dir) => router.fallback_service(ServeDir::new(dir)),
    None => router,
  };

  router
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
