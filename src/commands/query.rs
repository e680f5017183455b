//! Query command implementation

use super::common::or_null;
use crate::{
    cli::types::QueryName,
    context::DataContext,
    query::{QueryParams, QueryRows},
};

/// One text line per row; nulls print as `NULL`
pub fn format_rows(rows: &QueryRows) -> Vec<String> {
    match rows {
        QueryRows::PlayersWithTeam(rows) => rows
            .iter()
            .map(|r| {
                format!(
                    "{} {} ({}) {}",
                    r.id,
                    r.name,
                    r.position,
                    or_null(r.team.as_deref())
                )
            })
            .collect(),
        QueryRows::Rosters(rows) => rows
            .iter()
            .map(|r| {
                format!(
                    "{} [{}] {} ({})",
                    r.user_team,
                    r.owner,
                    or_null(r.player.as_deref()),
                    or_null(r.position.as_deref())
                )
            })
            .collect(),
        QueryRows::PositionCounts(rows) => rows
            .iter()
            .map(|r| format!("{} {} {}", r.team, r.position, r.count))
            .collect(),
        QueryRows::FreeAgents(rows) => rows
            .iter()
            .map(|r| format!("{} {} ({})", r.id, r.name, r.position))
            .collect(),
        QueryRows::PreferredTeamMatches(rows) => rows
            .iter()
            .map(|r| format!("{} {} {}", r.user, r.preferred_team, r.matches))
            .collect(),
    }
}

/// Handle the query command
pub fn handle_query(
    ctx: &DataContext,
    name: QueryName,
    params: QueryParams,
    as_json: bool,
) -> anyhow::Result<()> {
    let rows = ctx.query(name, params)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&rows)?); // tarpaulin::skip
    } else {
        for line in format_rows(&rows) {
            println!("{}", line); // tarpaulin::skip
        }
    }

    Ok(())
}
