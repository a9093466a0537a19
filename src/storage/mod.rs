//! Relational storage for users.
//!
//! Users live in a single `"user"` table reached through an sqlx pool.
//! PostgreSQL is the production target; SQLite works for local runs and tests.
//!
//! ## Components
//!
//! - [`Database`]: the shared connection pool plus schema synchronization
//! - [`UserRepository`]: find/create/save/remove for users
//! - [`SqlUserRepository`]: the SQL implementation of [`UserRepository`]

mod database;
mod repository;

pub use database::Database;
pub use repository::{SqlUserRepository, UserRepository};
