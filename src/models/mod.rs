//! Database models and DTOs for users, companies and jobs.

pub mod company;
pub mod job;
pub mod user;
