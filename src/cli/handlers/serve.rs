use anyhow::Result;
use colored::Colorize;

use crate::config::ServerSettings;
use crate::graphql::run_server;

use super::{CommandContext, connect_schema};

/// Startup message naming the address the server actually binds.
fn server_banner(server: &ServerSettings) -> String {
    format!(
        "{} http://{}\nGraphQL Playground: http://{}",
        "Server is running on".green(),
        server.bind_address(),
        server.bind_address()
    )
}

pub fn handle_serve(ctx: CommandContext, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut server = ctx.config.server.clone();
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    let addr = server.bind_address();

    tokio::runtime::Runtime::new()?.block_on(async {
        // The listener only starts once the database is reachable.
        let schema = connect_schema(&ctx.config.database).await?;

        println!("{}", server_banner(&server));

        run_server(schema, &addr).await
    })
}
