//! Use-case layer: input validation and repository orchestration.

pub mod auth;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use validator::Validate;

use crate::models::company::{Company, CreateCompany};
use crate::models::job::{CreateJob, Job, NewJob};
use crate::models::user::{CreateUser, Credentials, NewUser, User};
use crate::repository::{RepoError, Repository};
use auth::{AuthError, JwtAuth};

/// Failures reported by [`PortalService`]. The display text is what
/// clients see in the `error` field.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// One method per use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortalService: Send + Sync {
    async fn signup(&self, input: CreateUser) -> Result<User, ServiceError>;

    /// Returns a signed token for the user on success.
    async fn login(&self, input: Credentials) -> Result<String, ServiceError>;

    async fn add_company(&self, input: CreateCompany) -> Result<Company, ServiceError>;

    async fn view_all_companies(&self) -> Result<Vec<Company>, ServiceError>;

    async fn view_company(&self, cid: i64) -> Result<Company, ServiceError>;

    async fn add_job(&self, cid: i64, input: CreateJob) -> Result<Job, ServiceError>;

    async fn view_all_jobs(&self) -> Result<Vec<Job>, ServiceError>;

    async fn view_jobs_by_company(&self, cid: i64) -> Result<Vec<Job>, ServiceError>;

    async fn view_job(&self, jid: i64) -> Result<Job, ServiceError>;
}

/// Reject ids the store could never have issued.
fn ensure_positive(id: i64, what: &str) -> Result<(), ServiceError> {
    if id <= 0 {
        return Err(ServiceError::Validation(format!(
            "{what} id must be a positive integer"
        )));
    }
    Ok(())
}

/// [`PortalService`] backed by a [`Repository`] and a [`JwtAuth`].
#[derive(Clone)]
pub struct PortalServiceImpl {
    repo: Arc<dyn Repository>,
    auth: Arc<JwtAuth>,
}

impl PortalServiceImpl {
    pub fn new(repo: Arc<dyn Repository>, auth: Arc<JwtAuth>) -> Self {
        Self { repo, auth }
    }
}

#[async_trait]
impl PortalService for PortalServiceImpl {
    async fn signup(&self, input: CreateUser) -> Result<User, ServiceError> {
        input.validate()?;

        let password_hash = auth::hash_password(&input.password)?;
        let user = self
            .repo
            .create_user(NewUser {
                username: input.username,
                email: input.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "User signed up");
        Ok(user)
    }

    async fn login(&self, input: Credentials) -> Result<String, ServiceError> {
        input.validate()?;

        // Unknown email and wrong password look the same to the caller.
        let user = match self.repo.user_by_email(&input.email).await {
            Ok(user) => user,
            Err(e) if e.is_not_found() => return Err(ServiceError::InvalidCredentials),
            Err(e) => return Err(e.into()),
        };

        if !auth::verify_password(&input.password, &user.password_hash)? {
            tracing::info!(user_id = user.id, "Password mismatch on login");
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(self.auth.issue_token(user.id)?)
    }

    async fn add_company(&self, input: CreateCompany) -> Result<Company, ServiceError> {
        input.validate()?;
        Ok(self.repo.create_company(input).await?)
    }

    async fn view_all_companies(&self) -> Result<Vec<Company>, ServiceError> {
        Ok(self.repo.companies().await?)
    }

    async fn view_company(&self, cid: i64) -> Result<Company, ServiceError> {
        ensure_positive(cid, "company")?;
        Ok(self.repo.company_by_id(cid).await?)
    }

    async fn add_job(&self, cid: i64, input: CreateJob) -> Result<Job, ServiceError> {
        ensure_positive(cid, "company")?;
        input.validate()?;
        Ok(self.repo.create_job(NewJob::for_company(cid, input)).await?)
    }

    async fn view_all_jobs(&self) -> Result<Vec<Job>, ServiceError> {
        Ok(self.repo.jobs().await?)
    }

    async fn view_jobs_by_company(&self, cid: i64) -> Result<Vec<Job>, ServiceError> {
        ensure_positive(cid, "company")?;
        Ok(self.repo.jobs_by_company(cid).await?)
    }

    async fn view_job(&self, jid: i64) -> Result<Job, ServiceError> {
        ensure_positive(jid, "job")?;
        Ok(self.repo.job_by_id(jid).await?)
    }
}
