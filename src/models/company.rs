//! Company model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub field: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct CreateCompany {
    #[validate(length(min = 1, message = "company name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "company location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "company field is required"))]
    pub field: String,
}
