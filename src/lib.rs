//! # userql - a GraphQL API for users
//!
//! userql exposes create, read, update and delete operations over a single
//! `User` entity stored in a relational database (PostgreSQL, or SQLite for
//! local use).
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve the API on port 4000
//! userql serve
//!
//! # Point at a different database
//! userql --database-url sqlite://users.db?mode=rwc serve
//!
//! # Print the schema
//! userql schema
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers and server
//! - [`model`]: The `User` entity and its patch type
//! - [`storage`]: Database pool and user repository

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.userql.yml` files for server and database settings.
pub mod config;

/// Error types and result aliases.
///
/// Defines `UserqlError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
///
/// Provides async-graphql schema for querying and mutating users.
pub mod graphql;

/// Data models for userql.
pub mod model;

/// Relational storage layer.
///
/// Connects the sqlx pool and implements the user repository.
pub mod storage;

pub mod logging;
