//! Route definitions for the job portal API.

pub mod auth;
pub mod companies;
pub mod health;
pub mod jobs;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::errors::panic_response;
use crate::middleware::auth::authenticate;
use crate::middleware::trace::propagate_trace_id;
use crate::AppState;

/// All routes, with bearer authentication on the protected group.
///
/// The trace id is not attached here; see [`app`].
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/add", post(companies::create))
        .route("/view/allcomp", get(companies::list))
        .route("/viewcompany/{id}", get(companies::get_by_id))
        .route("/add/{cid}", post(jobs::create))
        .route("/view/all", get(jobs::list))
        .route("/job/view", get(jobs::list_by_company))
        .route("/viewjob/{id}", get(jobs::get_by_id))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .route("/check", get(health::check))
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .merge(protected)
        .with_state(state)
}

/// The served application: [`router`] plus panic recovery, trace id
/// propagation and HTTP spans.
pub fn app(state: AppState) -> Router {
    router(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(propagate_trace_id))
        .layer(TraceLayer::new_for_http())
}
