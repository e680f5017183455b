//! Query engine: the five canonical read views.
//!
//! Each view is a pure function of a [`Snapshot`], so both backends answer
//! every query through the same code. The backend's only job is to
//! materialize the snapshot.

pub mod alias;


use crate::cli::types::{OfficialTeamId, PlayerId, QueryName, UserId, UserTeamId};
use crate::error::Result;
use crate::storage::{OfficialTeam, Player, Snapshot, Store, User};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub use alias::{AliasSource, AliasTable, ResolvedLabel};

/// Player joined to its official team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerWithTeamRow {
    pub id: PlayerId,
    pub name: String,
    pub position: String,
    /// `None` for free agents
    pub team: Option<String>,
}

/// One roster line of a user team; player columns are `None` on the
/// placeholder row of an empty team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    pub user_team_id: UserTeamId,
    pub user_team: String,
    pub owner: String,
    pub player_id: Option<PlayerId>,
    pub player: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionCountRow {
    pub team: String,
    pub position: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeAgentRow {
    pub id: PlayerId,
    pub name: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredTeamMatchRow {
    pub user: String,
    pub preferred_team: String,
    pub matches: u64,
}

/// Rows produced by one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "query", content = "rows", rename_all = "snake_case")]
pub enum QueryRows {
    PlayersWithTeam(Vec<PlayerWithTeamRow>),
    Rosters(Vec<RosterRow>),
    PositionCounts(Vec<PositionCountRow>),
    FreeAgents(Vec<FreeAgentRow>),
    PreferredTeamMatches(Vec<PreferredTeamMatchRow>),
}

impl QueryRows {
    pub fn name(&self) -> QueryName {
        match self {
            QueryRows::PlayersWithTeam(_) => QueryName::PlayersWithTeam,
            QueryRows::Rosters(_) => QueryName::Rosters,
            QueryRows::PositionCounts(_) => QueryName::PositionCounts,
            QueryRows::FreeAgents(_) => QueryName::FreeAgents,
            QueryRows::PreferredTeamMatches(_) => QueryName::PreferredTeamMatches,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            QueryRows::PlayersWithTeam(rows) => rows.len(),
            QueryRows::Rosters(rows) => rows.len(),
            QueryRows::PositionCounts(rows) => rows.len(),
            QueryRows::FreeAgents(rows) => rows.len(),
            QueryRows::PreferredTeamMatches(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Optional query parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Restrict `preferred_team_matches` to one user.
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    aliases: AliasTable,
}

impl QueryEngine {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Snapshot `store` and evaluate `name` against it.
    pub fn run(&self, store: &dyn Store, name: QueryName, params: QueryParams) -> Result<QueryRows> {
        let snapshot = store.snapshot()?;
        let rows = self.evaluate(&snapshot, name, params);
        tracing::debug!(query = %name, rows = rows.len(), backend = %store.backend(), "query evaluated");
        Ok(rows)
    }

    pub fn evaluate(&self, snapshot: &Snapshot, name: QueryName, params: QueryParams) -> QueryRows {
        match name {
            QueryName::PlayersWithTeam => QueryRows::PlayersWithTeam(players_with_team(snapshot)),
            QueryName::Rosters => QueryRows::Rosters(rosters(snapshot)),
            QueryName::PositionCounts => QueryRows::PositionCounts(position_counts(snapshot)),
            QueryName::FreeAgents => QueryRows::FreeAgents(free_agents(snapshot)),
            QueryName::PreferredTeamMatches => QueryRows::PreferredTeamMatches(
                preferred_team_matches(snapshot, &self.aliases, params.user_id),
            ),
        }
    }
}

fn teams_by_id(snapshot: &Snapshot) -> HashMap<OfficialTeamId, &OfficialTeam> {
    snapshot.official_teams.iter().map(|t| (t.id, t)).collect()
}

fn players_by_id(snapshot: &Snapshot) -> HashMap<PlayerId, &Player> {
    snapshot.players.iter().map(|p| (p.id, p)).collect()
}

/// Key that sorts `None` after every `Some`
fn nulls_last<T: Ord>(value: Option<T>) -> (bool, Option<T>) {
    (value.is_none(), value)
}

/// Every player with its team name; free agents sort after named teams.
pub fn players_with_team(snapshot: &Snapshot) -> Vec<PlayerWithTeamRow> {
    let teams = teams_by_id(snapshot);

    let mut rows: Vec<PlayerWithTeamRow> = snapshot
        .players
        .iter()
        .map(|p| PlayerWithTeamRow {
            id: p.id,
            name: p.name.clone(),
            position: p.position.clone(),
            team: p
                .official_team_id
                .and_then(|id| teams.get(&id))
                .map(|t| t.name.clone()),
        })
        .collect();

    rows.sort_by(|a, b| {
        nulls_last(a.team.as_deref())
            .cmp(&nulls_last(b.team.as_deref()))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
    rows
}

/// One row per roster entry, or a single placeholder row for an empty team.
///
/// User teams whose owner is missing are skipped, as are entries whose player
/// is missing.
pub fn rosters(snapshot: &Snapshot) -> Vec<RosterRow> {
    let owners: HashMap<UserId, &User> = snapshot.users.iter().map(|u| (u.id, u)).collect();
    let players = players_by_id(snapshot);

    let mut rows = Vec::new();
    for team in &snapshot.user_teams {
        let Some(owner) = owners.get(&team.user_id) else {
            continue;
        };

        let before = rows.len();
        for entry in snapshot
            .roster_entries
            .iter()
            .filter(|e| e.user_team_id == team.id)
        {
            if let Some(player) = players.get(&entry.player_id) {
                rows.push(RosterRow {
                    user_team_id: team.id,
                    user_team: team.name.clone(),
                    owner: owner.name.clone(),
                    player_id: Some(player.id),
                    player: Some(player.name.clone()),
                    position: Some(player.position.clone()),
                });
            }
        }

        if rows.len() == before {
            rows.push(RosterRow {
                user_team_id: team.id,
                user_team: team.name.clone(),
                owner: owner.name.clone(),
                player_id: None,
                player: None,
                position: None,
            });
        }
    }

    rows.sort_by(|a, b| {
        a.user_team
            .cmp(&b.user_team)
            .then_with(|| a.user_team_id.cmp(&b.user_team_id))
            .then_with(|| nulls_last(a.player.as_deref()).cmp(&nulls_last(b.player.as_deref())))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    rows
}

/// Player count per (team name, position); free agents are left out.
pub fn position_counts(snapshot: &Snapshot) -> Vec<PositionCountRow> {
    let teams = teams_by_id(snapshot);

    let mut groups: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for player in &snapshot.players {
        let Some(team) = player.official_team_id.and_then(|id| teams.get(&id)) else {
            continue;
        };
        *groups
            .entry((team.name.as_str(), player.position.as_str()))
            .or_insert(0) += 1;
    }

    let mut rows: Vec<PositionCountRow> = groups
        .into_iter()
        .map(|((team, position), count)| PositionCountRow {
            team: team.to_string(),
            position: position.to_string(),
            count,
        })
        .collect();

    rows.sort_by(|a, b| {
        a.team
            .cmp(&b.team)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.position.cmp(&b.position))
    });
    rows
}

/// Players without a team reference, in id order.
pub fn free_agents(snapshot: &Snapshot) -> Vec<FreeAgentRow> {
    let mut rows: Vec<FreeAgentRow> = snapshot
        .players
        .iter()
        .filter(|p| p.official_team_id.is_none())
        .map(|p| FreeAgentRow {
            id: p.id,
            name: p.name.clone(),
            position: p.position.clone(),
        })
        .collect();
    rows.sort_by_key(|r| r.id);
    rows
}

/// How many rostered players of each user belong to their preferred team.
///
/// Every roster entry of every user team the user owns counts once, so a
/// player on two of the user's teams counts twice. Users without a label or
/// without a single match do not appear.
pub fn preferred_team_matches(
    snapshot: &Snapshot,
    aliases: &AliasTable,
    only_user: Option<UserId>,
) -> Vec<PreferredTeamMatchRow> {
    let teams = teams_by_id(snapshot);
    let players = players_by_id(snapshot);

    let mut groups: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for user in &snapshot.users {
        if only_user.is_some_and(|id| id != user.id) {
            continue;
        }
        let Some(label) = user
            .preferred_team
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
        else {
            continue;
        };

        let resolved = aliases.resolve(label, &snapshot.official_teams);
        tracing::debug!(
            user = %user.id,
            label,
            code = %resolved.code,
            source = ?resolved.source,
            "resolved preferred team"
        );

        let matches = snapshot
            .user_teams
            .iter()
            .filter(|t| t.user_id == user.id)
            .flat_map(|t| {
                snapshot
                    .roster_entries
                    .iter()
                    .filter(move |e| e.user_team_id == t.id)
            })
            .filter_map(|e| players.get(&e.player_id))
            .filter_map(|p| p.official_team_id.and_then(|id| teams.get(&id)))
            .filter(|team| team.short_code == resolved.code)
            .count() as u64;

        if matches > 0 {
            *groups.entry((user.name.as_str(), label)).or_insert(0) += matches;
        }
    }

    groups
        .into_iter()
        .map(|((user, preferred_team), matches)| PreferredTeamMatchRow {
            user: user.to_string(),
            preferred_team: preferred_team.to_string(),
            matches,
        })
        .collect()
}
