//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod properties;

use axum::Router;
use axum::routing::get;

use listings_app::ports::PropertyRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<PR>() -> Router<AppState<PR>>
where
    PR: PropertyRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/properties",
            get(properties::list::<PR>).post(properties::create::<PR>),
        )
        .route(
            "/properties/{id}",
            get(properties::get::<PR>)
                .put(properties::update::<PR>)
                .delete(properties::delete::<PR>),
        )
}
