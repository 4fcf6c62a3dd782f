//! Job posting routes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::errors::AppError;
use crate::middleware::auth::Authenticated;
use crate::models::job::{CreateJob, Job, JobsQuery};
use crate::AppState;

/// POST /add/{cid} — create a job under a company.
pub async fn create(
    State(state): State<AppState>,
    ctx: Authenticated,
    WithRejection(Path(cid), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(body), _): WithRejection<Json<CreateJob>, AppError>,
) -> Result<Json<Job>, AppError> {
    let job = state
        .service
        .add_job(cid, body)
        .await
        .map_err(|e| ctx.fail(e))?;

    tracing::info!(
        trace_id = %ctx.trace_id,
        job_id = job.id,
        company_id = cid,
        created_by = ctx.claims.user_id(),
        "Job created"
    );
    Ok(Json(job))
}

/// GET /view/all
pub async fn list(
    State(state): State<AppState>,
    ctx: Authenticated,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = state
        .service
        .view_all_jobs()
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(Json(jobs))
}

/// GET /job/view?cid={cid} — jobs of one company.
pub async fn list_by_company(
    State(state): State<AppState>,
    ctx: Authenticated,
    WithRejection(Query(query), _): WithRejection<Query<JobsQuery>, AppError>,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = state
        .service
        .view_jobs_by_company(query.cid)
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(Json(jobs))
}

/// GET /viewjob/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: Authenticated,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Job>, AppError> {
    let job = state.service.view_job(id).await.map_err(|e| ctx.fail(e))?;
    Ok(Json(job))
}
