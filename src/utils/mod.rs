//! Shared helpers for the infrastructure layer.
//!
//! - [`db_error`] - Classification of `sqlx` errors into [`crate::AppError`]

pub mod db_error;
