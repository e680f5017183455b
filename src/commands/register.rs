//! Register command implementation

use crate::{
    cli::RegisterCmd,
    context::DataContext,
    repository::{
        OfficialTeamForm, PlayerForm, Registration, RosterEntryForm, UserForm, UserTeamForm,
    },
};

/// Turn parsed CLI arguments into a registration form
pub fn registration_from(cmd: RegisterCmd) -> Registration {
    match cmd {
        RegisterCmd::User {
            name,
            email,
            password,
            sex,
            phone,
            birth_date,
            preferred_team,
        } => Registration::User(UserForm {
            name,
            email,
            password,
            sex,
            phone,
            birth_date,
            preferred_team,
        }),
        RegisterCmd::OfficialTeam {
            name,
            short_code,
            short_label,
        } => Registration::OfficialTeam(OfficialTeamForm {
            name,
            short_code,
            short_label,
        }),
        RegisterCmd::Player {
            name,
            position,
            team_id,
        } => Registration::Player(PlayerForm {
            name,
            position,
            official_team_id: team_id,
        }),
        RegisterCmd::UserTeam { name, user_id } => {
            Registration::UserTeam(UserTeamForm { name, user_id })
        }
        RegisterCmd::RosterEntry {
            user_team_id,
            player_id,
        } => Registration::RosterEntry(RosterEntryForm {
            user_team_id,
            player_id,
        }),
    }
}

/// Handle the register command
pub fn handle_register(ctx: &mut DataContext, cmd: RegisterCmd) -> anyhow::Result<u64> {
    let registration = registration_from(cmd);
    let kind = registration.kind();

    let id = ctx.register(registration)?;
    println!("✓ Registered {} with id {}", kind, id); // tarpaulin::skip
    Ok(id)
}
