//! Job posting model. Every job belongs to exactly one company (`cid`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub cid: i64,
    pub name: String,
    pub salary: String,
    pub notice_period: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job request body; the company id comes from the path.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct CreateJob {
    #[validate(length(min = 1, message = "job name is required"))]
    pub name: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub notice_period: String,
}

/// Row to insert, with the owning company attached.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub cid: i64,
    pub name: String,
    pub salary: String,
    pub notice_period: String,
}

impl NewJob {
    pub fn for_company(cid: i64, job: CreateJob) -> Self {
        Self {
            cid,
            name: job.name,
            salary: job.salary,
            notice_period: job.notice_period,
        }
    }
}

/// Query string for listing the jobs of one company.
#[derive(Debug, Clone, Deserialize)]
pub struct JobsQuery {
    pub cid: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_carries_company_id() {
        let job = NewJob::for_company(
            2,
            CreateJob {
                name: "developer".to_string(),
                salary: "30000".to_string(),
                notice_period: "3 weeks".to_string(),
            },
        );
        assert_eq!(job.cid, 2);
        assert_eq!(job.name, "developer");
    }

    #[test]
    fn create_job_optional_fields_default() {
        let job: CreateJob = serde_json::from_str(r#"{"name":"dev"}"#).unwrap();
        assert_eq!(job.salary, "");
        assert_eq!(job.notice_period, "");
        assert!(job.validate().is_ok());
    }
}
