//! Core domain entities representing the catalog data model.
//!
//! Entities are plain data structures. Creation and partial-update inputs
//! live next to the entity they build:
//!
//! - [`Author`] / [`NewAuthor`] / [`AuthorPatch`]
//! - [`Book`] / [`NewBook`] / [`BookPatch`]
//!
//! Read models that join both tables ([`AuthorListing`], [`AuthorDetail`],
//! [`BookWithAuthor`]) are defined here too so repositories can return them
//! directly.

pub mod author;
pub mod book;

pub use author::{Author, AuthorDetail, AuthorListing, AuthorPatch, NewAuthor};
pub use book::{Book, BookPatch, BookWithAuthor, NewBook};
