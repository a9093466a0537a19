mod mutate;
mod query;
mod schema;
mod serve;

pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::handle_serve;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::{AppConfig, DatabaseSettings};
use crate::graphql::{SharedRepository, UsersSchema, build_schema};
use crate::storage::{Database, SqlUserRepository};

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: AppConfig,
}

impl CommandContext {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

/// Connect to the database, then build the schema around it.
pub(crate) async fn connect_schema(settings: &DatabaseSettings) -> Result<UsersSchema> {
    let db = Database::connect(settings)
        .await
        .context("Failed to connect to database")?;
    let repo: SharedRepository = Arc::new(SqlUserRepository::new(db));
    Ok(build_schema(repo))
}

pub(crate) fn parse_variables(variables: Option<String>) -> Result<async_graphql::Variables> {
    match variables {
        Some(v) => serde_json::from_str(&v).context("Invalid --variables JSON"),
        None => Ok(async_graphql::Variables::default()),
    }
}

/// Run `document` in-process and print the JSON response.
pub(crate) fn execute_and_print(
    ctx: CommandContext,
    document: String,
    variables: Option<String>,
) -> Result<()> {
    let vars = parse_variables(variables)?;

    let response = tokio::runtime::Runtime::new()?.block_on(async {
        let schema = connect_schema(&ctx.config.database).await?;
        let request = async_graphql::Request::new(document).variables(vars);
        Ok::<_, anyhow::Error>(schema.execute(request).await)
    })?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
