//! Authentication routes: signup and signin.

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::middleware::auth::Traced;
use crate::models::user::{CreateUser, Credentials, UserResponse};
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    ctx: Traced,
    WithRejection(Json(body), _): WithRejection<Json<CreateUser>, AppError>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.service.signup(body).await.map_err(|e| ctx.fail(e))?;
    Ok(Json(UserResponse::from(user)))
}

/// POST /signin
pub async fn signin(
    State(state): State<AppState>,
    ctx: Traced,
    WithRejection(Json(body), _): WithRejection<Json<Credentials>, AppError>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.service.login(body).await.map_err(|e| ctx.fail(e))?;
    Ok(Json(TokenResponse { token }))
}
