//! List command implementation

use super::common::or_null;
use crate::{cli::types::EntityKind, context::DataContext, storage::Record};
use serde_json::Value;

/// One text line per record. Passwords are never shown.
pub fn format_record(record: &Record) -> String {
    match record {
        Record::User(u) => format!(
            "{} {} <{}> {} {} {} {}",
            u.id,
            u.name,
            u.email,
            u.sex,
            or_null(u.phone.as_deref()),
            u.birth_date.format("%Y-%m-%d"),
            or_null(u.preferred_team.as_deref()),
        ),
        Record::OfficialTeam(t) => format!(
            "{} {} [{}] {}",
            t.id,
            t.name,
            t.short_code,
            or_null(t.short_label.as_deref()),
        ),
        Record::Player(p) => format!(
            "{} {} ({}) team {}",
            p.id,
            p.name,
            p.position,
            p.official_team_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| super::common::NULL_DISPLAY.to_string()),
        ),
        Record::UserTeam(t) => format!("{} {} owner {}", t.id, t.name, t.user_id),
        Record::RosterEntry(e) => format!(
            "{} user team {} player {}",
            e.id, e.user_team_id, e.player_id
        ),
    }
}

/// JSON form of a record, with any password field removed
pub fn record_json(record: &Record) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(record)?;
    if let Value::Object(map) = &mut value {
        map.remove("password");
    }
    Ok(value)
}

/// Handle the list command
pub fn handle_list(ctx: &DataContext, kind: EntityKind, as_json: bool) -> anyhow::Result<()> {
    let records = ctx.list(kind)?;

    if as_json {
        let values = records
            .iter()
            .map(record_json)
            .collect::<serde_json::Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&values)?); // tarpaulin::skip
    } else {
        for record in &records {
            println!("{}", format_record(record)); // tarpaulin::skip
        }
    }

    Ok(())
}
