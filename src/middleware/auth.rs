//! Bearer-token authentication and the per-request gate extractors.
//!
//! [`authenticate`] wraps the protected routes: it verifies the
//! `Authorization: Bearer` token and stores the [`Claims`] in the request
//! extensions. Handlers then take [`Traced`] or [`Authenticated`] to receive
//! the trace id and claims as plain values:
//! ```ignore
//! async fn handler(ctx: Authenticated) -> impl IntoResponse { ... }
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::errors::AppError;
use crate::middleware::trace::TraceId;
use crate::services::auth::Claims;
use crate::services::ServiceError;
use crate::AppState;

/// Verify the bearer token and attach its claims to the request.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let trace_id = request
        .extensions()
        .get::<TraceId>()
        .copied()
        .ok_or_else(|| {
            tracing::error!("Trace id missing from request");
            AppError::Internal
        })?;

    let Some(Authorization(bearer)) = request.headers().typed_get::<Authorization<Bearer>>()
    else {
        tracing::info!(trace_id = %trace_id, "Missing bearer token");
        return Err(AppError::Unauthorized);
    };

    let claims = state.auth.validate_token(bearer.token()).map_err(|e| {
        tracing::info!(trace_id = %trace_id, error = %e, "Token rejected");
        AppError::Unauthorized
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Gate for public routes: the trace id must be present.
#[derive(Debug, Clone, Copy)]
pub struct Traced(pub TraceId);

impl<S: Send + Sync> FromRequestParts<S> for Traced {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TraceId>()
            .copied()
            .map(Traced)
            .ok_or_else(|| {
                tracing::error!("Trace id missing from request");
                AppError::Internal
            })
    }
}

impl Traced {
    /// Log a failed use case against this request and convert it.
    pub fn fail(&self, err: ServiceError) -> AppError {
        tracing::warn!(trace_id = %self.0, error = %err, "Request failed");
        AppError::Service(err)
    }
}

/// Gate for protected routes: trace id first, then verified claims.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub trace_id: TraceId,
    pub claims: Claims,
}

impl<S: Send + Sync> FromRequestParts<S> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Traced(trace_id) = Traced::from_request_parts(parts, state).await?;

        let claims = parts.extensions.get::<Claims>().cloned().ok_or_else(|| {
            tracing::info!(trace_id = %trace_id, "Claims missing from request");
            AppError::Unauthorized
        })?;

        Ok(Authenticated { trace_id, claims })
    }
}

impl Authenticated {
    pub fn fail(&self, err: ServiceError) -> AppError {
        Traced(self.trace_id).fail(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    async fn whoami(ctx: Authenticated) -> String {
        ctx.claims.sub
    }

    fn bare_router() -> Router {
        Router::new().route("/", get(whoami))
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn missing_trace_id_is_internal_error() {
        let response = bare_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, r#"{"error":"Internal Server Error"}"#);
    }

    #[tokio::test]
    async fn missing_claims_is_unauthorized() {
        let mut request = Request::builder().uri("/").body(Body::empty()).unwrap();
        request.extensions_mut().insert(TraceId::generate());

        let response = bare_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_string(response).await, r#"{"error":"Unauthorized"}"#);
    }

    #[tokio::test]
    async fn trace_id_and_claims_reach_the_handler() {
        let mut request = Request::builder().uri("/").body(Body::empty()).unwrap();
        request.extensions_mut().insert(TraceId::generate());
        request.extensions_mut().insert(Claims {
            sub: "17".to_string(),
            ..Default::default()
        });

        let response = bare_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "17");
    }
}
