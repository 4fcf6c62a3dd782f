//! sqlx-backed [`Repository`] implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{RepoError, Repository};
use crate::models::company::{Company, CreateCompany};
use crate::models::job::{Job, NewJob};
use crate::models::user::{NewUser, User};

#[derive(Debug, Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Log the storage error and replace it with a client-facing message.
fn normalize(err: sqlx::Error, message: &str) -> RepoError {
    match err {
        sqlx::Error::RowNotFound => {
            tracing::info!(error = %err, "{message}");
            RepoError::NotFound(message.to_string())
        }
        _ => {
            tracing::error!(error = %err, "{message}");
            RepoError::Storage(message.to_string())
        }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn create_user(&self, user: NewUser) -> Result<User, RepoError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                tracing::info!(error = %e, "Duplicate signup");
                RepoError::Storage("email is already registered".to_string())
            }
            _ => normalize(e, "could not create the user"),
        })
    }

    async fn user_by_email(&self, email: &str) -> Result<User, RepoError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| normalize(e, "could not find the user"))
    }

    async fn create_company(&self, company: CreateCompany) -> Result<Company, RepoError> {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, location, field)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&company.name)
        .bind(&company.location)
        .bind(&company.field)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| normalize(e, "could not create the company"))
    }

    async fn companies(&self) -> Result<Vec<Company>, RepoError> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| normalize(e, "could not find the companies"))
    }

    async fn company_by_id(&self, cid: i64) -> Result<Company, RepoError> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(cid)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| normalize(e, "could not find the company"))
    }

    async fn create_job(&self, job: NewJob) -> Result<Job, RepoError> {
        sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (cid, name, salary, notice_period)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(job.cid)
        .bind(&job.name)
        .bind(&job.salary)
        .bind(&job.notice_period)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| normalize(e, "could not create the job"))
    }

    async fn jobs(&self) -> Result<Vec<Job>, RepoError> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| normalize(e, "could not find the jobs"))
    }

    async fn jobs_by_company(&self, cid: i64) -> Result<Vec<Job>, RepoError> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE cid = $1 ORDER BY id")
            .bind(cid)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| normalize(e, "could not find the jobs for the company"))
    }

    async fn job_by_id(&self, jid: i64) -> Result<Job, RepoError> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(jid)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| normalize(e, "could not find the job"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_row_becomes_not_found() {
        let err = normalize(sqlx::Error::RowNotFound, "could not find the company");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "could not find the company");
    }

    #[test]
    fn other_failures_become_storage_errors() {
        let err = normalize(sqlx::Error::PoolTimedOut, "could not find the jobs");
        assert_eq!(err, RepoError::Storage("could not find the jobs".to_string()));
    }
}
