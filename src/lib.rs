//! Futebol App Library
//!
//! Data layer for a football fantasy app: users, official teams, players,
//! users' fantasy teams and their rosters, stored on either of two
//! interchangeable backends.
//!
//! ## Features
//!
//! - **Registration**: Validated creation of every entity kind
//! - **Two Backends**: SQLite (relational) or a JSON document file, same behaviour
//! - **Referential Rules**: Missing references are refused, deletes cascade
//! - **Read Views**: Rosters, free agents, position counts and more
//! - **Preferred-Team Aliases**: "FURIA" on a user matches players of team "FUR"
//!
//! ## Quick Start
//!
//! ```rust
//! use futebol_app::{
//!     query::QueryParams,
//!     repository::{OfficialTeamForm, PlayerForm, Registration},
//!     storage::BackendKind,
//!     DataContext, OfficialTeamId, QueryName,
//! };
//!
//! # fn example() -> futebol_app::Result<()> {
//! let mut ctx = DataContext::in_memory(BackendKind::Document)?;
//!
//! let team = ctx.register(Registration::OfficialTeam(OfficialTeamForm {
//!     name: "Furia Esports".to_string(),
//!     short_code: "FUR".to_string(),
//!     short_label: Some("FURIA".to_string()),
//! }))?;
//! ctx.register(Registration::Player(PlayerForm {
//!     name: "Jogador A".to_string(),
//!     position: "Atacante".to_string(),
//!     official_team_id: Some(OfficialTeamId::new(team)),
//! }))?;
//!
//! let rows = ctx.query(QueryName::PlayersWithTeam, QueryParams::default())?;
//! assert_eq!(rows.len(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Environment Configuration
//!
//! Pick the backend and database file without a config file:
//! ```bash
//! export FUTEBOL_BACKEND=document
//! export FUTEBOL_DATABASE=./futebol.json
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod query;
pub mod repository;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{
    EntityKind, OfficialTeamId, PlayerId, QueryName, RosterEntryId, Sex, UserId, UserTeamId,
};
pub use config::AppConfig;
pub use context::DataContext;
pub use error::{FutebolError, Result};
