//! Persistence port for users, companies and jobs.
//!
//! Services talk to [`Repository`]; [`PgRepository`] is the PostgreSQL
//! adapter. Every adapter failure is normalized into a [`RepoError`] whose
//! message is safe to hand back to clients.

mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::company::{Company, CreateCompany};
use crate::models::job::{Job, NewJob};
use crate::models::user::{NewUser, User};

pub use postgres::PgRepository;

/// Errors raised by repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    /// The requested row does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Query or connection failure.
    #[error("{0}")]
    Storage(String),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// One method per entity operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, RepoError>;

    async fn user_by_email(&self, email: &str) -> Result<User, RepoError>;

    async fn create_company(&self, company: CreateCompany) -> Result<Company, RepoError>;

    async fn companies(&self) -> Result<Vec<Company>, RepoError>;

    async fn company_by_id(&self, cid: i64) -> Result<Company, RepoError>;

    async fn create_job(&self, job: NewJob) -> Result<Job, RepoError>;

    async fn jobs(&self) -> Result<Vec<Job>, RepoError>;

    async fn jobs_by_company(&self, cid: i64) -> Result<Vec<Job>, RepoError>;

    async fn job_by_id(&self, jid: i64) -> Result<Job, RepoError>;
}
