//! In-process store for running the API without PostgreSQL.
//!
//! [`MemoryCatalog`] implements both repository traits over one shared set
//! of tables, so author cascades and book foreign keys behave the way the
//! database does. Integration tests build the application state on it.

mod catalog;

pub use catalog::MemoryCatalog;
