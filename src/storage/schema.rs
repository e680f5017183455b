//! Relational store: SQLite connection and schema management

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

/// SQLite-backed store holding the five entity tables
pub struct RelationalStore {
    pub(crate) conn: Connection,
}

impl RelationalStore {
    /// Open (or create) the database file and ensure tables exist
    pub fn open(db_path: &Path) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        Self::with_connection(conn)
    }

    /// Create a throwaway in-memory database
    pub fn new_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        // SQLite leaves foreign keys off unless asked per connection
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                sex TEXT NOT NULL CHECK (sex IN ('M', 'F', 'O')),
                phone TEXT,
                birth_date TEXT NOT NULL,
                preferred_team TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS official_teams (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                short_code TEXT NOT NULL UNIQUE,
                short_label TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                position TEXT NOT NULL,
                official_team_id INTEGER
                    REFERENCES official_teams(id) ON DELETE SET NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS user_teams (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                user_id INTEGER NOT NULL
                    REFERENCES users(id) ON DELETE CASCADE
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS roster_entries (
                id INTEGER PRIMARY KEY,
                user_team_id INTEGER NOT NULL
                    REFERENCES user_teams(id) ON DELETE CASCADE,
                player_id INTEGER NOT NULL
                    REFERENCES players(id) ON DELETE CASCADE,
                UNIQUE (user_team_id, player_id)
            )",
            [],
        )?;

        // Indexes for the join columns
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_players_team ON players(official_team_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_user_teams_user ON user_teams(user_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_roster_player ON roster_entries(player_id)",
            [],
        )?;

        Ok(())
    }
}
