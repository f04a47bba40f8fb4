//! Job Board Database Layer
//!
//! This crate provides the persistence layer for the job board: user
//! credentials, job postings, profiles and payment verifications, stored
//! in SQLite via sqlx.

pub mod error;
pub mod models;
pub mod repository;
pub mod utils;

pub use error::DbError;
pub use models::*;
pub use repository::{Database, DatabaseOptions};
