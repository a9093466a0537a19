use anyhow::{Context, Result};
use clap::Parser;

use userql::cli::handlers::{
    CommandContext, handle_mutate, handle_query, handle_schema, handle_serve,
};
use userql::cli::{Cli, Commands};
use userql::config::AppConfig;
use userql::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let mut config =
        AppConfig::load(cli.config.as_deref(), &cwd).context("Failed to load config")?;
    if let Some(url) = cli.database_url {
        config.database.url = Some(url);
    }

    logging::init(cli.verbose, cli.log_file, config.database.logging);

    let ctx = CommandContext::new(config);
    match cli.command {
        Commands::Serve { host, port } => handle_serve(ctx, host, port),
        Commands::Query { query, variables } => handle_query(ctx, query, variables),
        Commands::Mutate {
            mutation,
            variables,
        } => handle_mutate(ctx, mutation, variables),
        Commands::Schema => handle_schema(),
    }
}
