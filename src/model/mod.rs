//! Data models for userql.
//!
//! - [`User`]: the persisted user entity
//! - [`NewUser`]: the fields needed to create a user
//! - [`UserPatch`]: a partial update merged into an existing user

mod user;

pub use user::{NewUser, User, UserId, UserPatch};
