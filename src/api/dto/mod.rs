//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs carry `validator` rules and form-tolerant deserializers;
//! response DTOs fix the JSON shape (camelCase, `_count`, embedded authors).

pub mod author;
pub mod book;
pub mod fields;
pub mod health;
pub mod message;
pub mod search;
pub mod stats;
