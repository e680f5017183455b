//! Integration tests for CLI parsing and command handlers

use clap::Parser;
use futebol_app::{
    cli::{Commands, FutebolCli, RegisterCmd},
    commands::{
        handle_list, handle_query, handle_register, open_context, resolve_config,
        ConfigOverrides,
    },
    query::QueryParams,
    storage::BackendKind,
    EntityKind, QueryName, UserId,
};
use tempfile::tempdir;

#[test]
fn test_parse_register_user() {
    let cli = FutebolCli::try_parse_from([
        "futebol",
        "register",
        "user",
        "--name",
        "Eduardo Fontes",
        "--email",
        "edu@example.com",
        "--password",
        "segredo",
        "--sex",
        "M",
        "--birth-date",
        "1998-03-14",
        "--preferred-team",
        "FURIA",
    ])
    .unwrap();

    match cli.command {
        Commands::Register {
            cmd: RegisterCmd::User {
                email,
                preferred_team,
                phone,
                ..
            },
        } => {
            assert_eq!(email, "edu@example.com");
            assert_eq!(preferred_team.as_deref(), Some("FURIA"));
            assert!(phone.is_none());
        }
        other => panic!("Expected register user, got {:?}", other),
    }
}

#[test]
fn test_parse_list_with_global_flags() {
    let cli = FutebolCli::try_parse_from([
        "futebol",
        "list",
        "official-team",
        "--json",
        "--backend",
        "document",
        "--database",
        "league.json",
    ])
    .unwrap();

    assert_eq!(cli.backend, Some(BackendKind::Document));
    assert_eq!(cli.database.as_deref(), Some(std::path::Path::new("league.json")));
    match cli.command {
        Commands::List { kind, output } => {
            assert_eq!(kind, EntityKind::OfficialTeam);
            assert!(output.json);
        }
        other => panic!("Expected list, got {:?}", other),
    }
}

#[test]
fn test_parse_query_with_user_filter() {
    let cli = FutebolCli::try_parse_from([
        "futebol",
        "query",
        "preferred-team-matches",
        "--user-id",
        "2",
    ])
    .unwrap();

    match cli.command {
        Commands::Query { name, user_id, .. } => {
            assert_eq!(name, QueryName::PreferredTeamMatches);
            assert_eq!(user_id, Some(UserId::new(2)));
        }
        other => panic!("Expected query, got {:?}", other),
    }
}

#[test]
fn test_parse_rejects_zero_id() {
    let result = FutebolCli::try_parse_from([
        "futebol",
        "register",
        "roster-entry",
        "--user-team-id",
        "0",
        "--player-id",
        "1",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_parse_rejects_unknown_query() {
    assert!(FutebolCli::try_parse_from(["futebol", "query", "top-scorers"]).is_err());
}

#[test]
fn test_handlers_against_document_file() {
    let dir = tempdir().unwrap();
    let database = dir.path().join("league.json");
    let config = resolve_config(&ConfigOverrides {
        config: Some(write_config(dir.path())),
        backend: Some(BackendKind::Document),
        database: Some(database.clone()),
    })
    .unwrap();

    let mut ctx = open_context(&config).unwrap();
    let team = handle_register(
        &mut ctx,
        RegisterCmd::OfficialTeam {
            name: "Furia Esports".to_string(),
            short_code: "fur".to_string(),
            short_label: Some("FURIA".to_string()),
        },
    )
    .unwrap();
    assert_eq!(team, 1);

    handle_list(&ctx, EntityKind::OfficialTeam, true).unwrap();
    handle_query(&ctx, QueryName::Rosters, QueryParams::default(), false).unwrap();

    let contents = std::fs::read_to_string(&database).unwrap();
    assert!(contents.contains("\"FUR\""));
}

fn write_config(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("futebol.toml");
    std::fs::write(&path, "[aliases]\nFURIA = \"FUR\"\n").unwrap();
    path
}
