//! CLI argument definitions and parsing structures.

use super::types::{EntityKind, OfficialTeamId, PlayerId, QueryName, UserId, UserTeamId};
use crate::storage::BackendKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Output options shared between read commands
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output results as JSON instead of text lines.
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum RegisterCmd {
    /// Register a user
    User {
        #[clap(long)]
        name: String,

        /// Must not belong to another user.
        #[clap(long)]
        email: String,

        #[clap(long)]
        password: String,

        /// M, F or O.
        #[clap(long)]
        sex: String,

        #[clap(long)]
        phone: Option<String>,

        /// Birth date as YYYY-MM-DD.
        #[clap(long)]
        birth_date: String,

        /// Favourite team as typed, e.g. FURIA.
        #[clap(long)]
        preferred_team: Option<String>,
    },

    /// Register an official team
    OfficialTeam {
        #[clap(long)]
        name: String,

        /// Unique code, stored upper-cased (e.g. FUR, LOD).
        #[clap(long)]
        short_code: String,

        /// Label users may type as their preferred team (e.g. FURIA).
        #[clap(long)]
        short_label: Option<String>,
    },

    /// Register a player; omit --team-id for a free agent
    Player {
        #[clap(long)]
        name: String,

        /// Free text, e.g. Atacante, Goleiro.
        #[clap(long)]
        position: String,

        #[clap(long)]
        team_id: Option<OfficialTeamId>,
    },

    /// Create a fantasy team owned by a user
    UserTeam {
        #[clap(long)]
        name: String,

        #[clap(long)]
        user_id: UserId,
    },

    /// Add a player to a user team
    RosterEntry {
        #[clap(long)]
        user_team_id: UserTeamId,

        #[clap(long)]
        player_id: PlayerId,
    },
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a new record
    Register {
        #[clap(subcommand)]
        cmd: RegisterCmd,
    },

    /// List every record of one kind
    List {
        #[clap(value_enum)]
        kind: EntityKind,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Run one of the read views
    Query {
        #[clap(value_enum)]
        name: QueryName,

        /// Only count this user (preferred-team-matches).
        #[clap(long)]
        user_id: Option<UserId>,

        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "futebol", about = "Football fantasy roster manager")]
pub struct FutebolCli {
    /// TOML config file (defaults to ./futebol.toml when present).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend (or set `FUTEBOL_BACKEND`).
    #[clap(long, global = true, value_enum)]
    pub backend: Option<BackendKind>,

    /// Database file (or set `FUTEBOL_DATABASE`).
    #[clap(long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
