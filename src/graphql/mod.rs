//! GraphQL schema, resolvers, and HTTP server for userql.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! userql serve --port 4000
//!
//! # Execute a query from CLI
//! userql query '{ users { id firstName email } }'
//!
//! # Execute a mutation from CLI
//! userql mutate 'createUser(firstName: "A", lastName: "B", age: 30, email: "a@b.com") { id }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `hello`, `user`, `users`
//! - **Mutations**: `createUser`, `updateUser`, `deleteUser`
//!
//! `updateUser` and `deleteUser` never return errors: every failure,
//! including a missing user, comes back as `false`.

mod schema;
mod server;
mod types;

pub use schema::{
    MutationRoot, QueryRoot, SharedRepository, UsersSchema, apply_update, build_schema,
    greeting, remove_user, sdl,
};
pub use server::{router, run_server};
pub use types::*;
