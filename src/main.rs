//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use futebol_app::{
    cli::{Commands, FutebolCli},
    commands::{
        handle_list, handle_query, handle_register, open_context, resolve_config,
        ConfigOverrides,
    },
    logging::init_logging,
    query::QueryParams,
};

/// Run the CLI.
fn main() -> anyhow::Result<()> {
    let app = FutebolCli::parse();
    init_logging(app.verbose);

    let config = resolve_config(&ConfigOverrides {
        config: app.config,
        backend: app.backend,
        database: app.database,
    })?;
    let mut ctx = open_context(&config)?;

    match app.command {
        Commands::Register { cmd } => {
            handle_register(&mut ctx, cmd)?;
        }

        Commands::List { kind, output } => handle_list(&ctx, kind, output.json)?,

        Commands::Query {
            name,
            user_id,
            output,
        } => handle_query(&ctx, name, QueryParams { user_id }, output.json)?,
    }

    Ok(())
}
