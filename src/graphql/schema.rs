use std::sync::Arc;

use async_graphql::{
    Context, EmptySubscription, ID, MaybeUndefined, Object, Schema, SchemaBuilder,
};

use crate::error::{Result, UserqlError};
use crate::model::{NewUser, UserId, UserPatch};
use crate::storage::UserRepository;

use super::types::*;

pub type UsersSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Repository handle shared by every resolver.
pub type SharedRepository = Arc<dyn UserRepository>;

fn schema_builder() -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
}

pub fn build_schema(repo: SharedRepository) -> UsersSchema {
    schema_builder().data(repo).finish()
}

/// The schema in SDL form. Needs no database.
pub fn sdl() -> String {
    schema_builder().finish().sdl()
}

fn get_repo<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a SharedRepository> {
    ctx.data::<SharedRepository>()
}

fn parse_id(id: &ID) -> Result<UserId> {
    id.parse::<UserId>()
        .map_err(|_| UserqlError::InvalidId(id.to_string()))
}

/// `Undefined` means "leave alone"; an explicit `null` would clear a
/// NOT NULL column and is rejected.
fn present<T>(field: &'static str, value: MaybeUndefined<T>) -> Result<Option<T>> {
    match value {
        MaybeUndefined::Undefined => Ok(None),
        MaybeUndefined::Null => Err(UserqlError::NullField(field)),
        MaybeUndefined::Value(v) => Ok(Some(v)),
    }
}

fn build_patch(
    first_name: MaybeUndefined<String>,
    last_name: MaybeUndefined<String>,
    age: MaybeUndefined<i32>,
    email: MaybeUndefined<String>,
) -> Result<UserPatch> {
    Ok(UserPatch {
        first_name: present("firstName", first_name)?,
        last_name: present("lastName", last_name)?,
        age: present("age", age)?,
        email: present("email", email)?,
    })
}

pub fn greeting(name: Option<&str>) -> String {
    let name = name.filter(|n| !n.is_empty()).unwrap_or("World");
    format!("Hellssso {}", name)
}

/// Load, merge, save. Any failure along the way is reported to the caller.
pub async fn apply_update(repo: &dyn UserRepository, id: &ID, patch: UserPatch) -> Result<()> {
    let id = parse_id(id)?;
    let mut user = repo
        .find_one(id)
        .await?
        .ok_or_else(|| UserqlError::NotFound(id.to_string()))?;
    if patch.is_empty() {
        tracing::debug!(id, "No fields supplied, saving user unchanged");
    }
    patch.apply(&mut user);
    repo.save(&user).await?;
    Ok(())
}

/// Load then remove. `Ok(false)` when there was nothing to remove.
pub async fn remove_user(repo: &dyn UserRepository, id: &ID) -> Result<bool> {
    let id = parse_id(id)?;
    match repo.find_one(id).await? {
        Some(user) => {
            repo.remove(&user).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Greet `name`, or the world
    async fn hello(&self, name: Option<String>) -> String {
        greeting(name.as_deref())
    }

    /// Get a single user by ID
    async fn user(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<User> {
        let repo = get_repo(ctx)?;
        let id = parse_id(&id)?;
        match repo.find_one(id).await? {
            Some(user) => Ok(user.into()),
            None => Err(UserqlError::NotFound(id.to_string()).into()),
        }
    }

    /// List all users
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<User>> {
        let repo = get_repo(ctx)?;
        let users = repo.find_all().await?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }
}

pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Create a new user
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        first_name: String,
        last_name: String,
        age: i32,
        email: String,
    ) -> async_graphql::Result<User> {
        let repo = get_repo(ctx)?;
        let user = repo
            .create(NewUser::new(first_name, last_name, age, email))
            .await?;
        Ok(user.into())
    }

    /// Update the supplied fields of a user. Returns false if anything fails.
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        first_name: MaybeUndefined<String>,
        last_name: MaybeUndefined<String>,
        age: MaybeUndefined<i32>,
        email: MaybeUndefined<String>,
    ) -> async_graphql::Result<bool> {
        let repo = get_repo(ctx)?;
        let result = match build_patch(first_name, last_name, age, email) {
            Ok(patch) => apply_update(repo.as_ref(), &id, patch).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::warn!(id = %id.as_str(), error = %e, "updateUser failed");
                Ok(false)
            }
        }
    }

    /// Delete a user permanently. Returns false if absent or on failure.
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<bool> {
        let repo = get_repo(ctx)?;
        match remove_user(repo.as_ref(), &id).await {
            Ok(removed) => Ok(removed),
            Err(e) => {
                tracing::warn!(id = %id.as_str(), error = %e, "deleteUser failed");
                Ok(false)
            }
        }
    }
}
