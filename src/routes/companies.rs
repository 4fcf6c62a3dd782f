//! Company routes.

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::errors::AppError;
use crate::middleware::auth::Authenticated;
use crate::models::company::{Company, CreateCompany};
use crate::AppState;

/// POST /add — create a company.
pub async fn create(
    State(state): State<AppState>,
    ctx: Authenticated,
    WithRejection(Json(body), _): WithRejection<Json<CreateCompany>, AppError>,
) -> Result<Json<Company>, AppError> {
    let company = state
        .service
        .add_company(body)
        .await
        .map_err(|e| ctx.fail(e))?;

    tracing::info!(
        trace_id = %ctx.trace_id,
        company_id = company.id,
        created_by = ctx.claims.user_id(),
        "Company created"
    );
    Ok(Json(company))
}

/// GET /view/allcomp
pub async fn list(
    State(state): State<AppState>,
    ctx: Authenticated,
) -> Result<Json<Vec<Company>>, AppError> {
    let companies = state
        .service
        .view_all_companies()
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(Json(companies))
}

/// GET /viewcompany/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ctx: Authenticated,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Company>, AppError> {
    let company = state
        .service
        .view_company(id)
        .await
        .map_err(|e| ctx.fail(e))?;
    Ok(Json(company))
}
