//! Raw registration input and its validation.
//!
//! Every form is checked here before any storage call; a form that passes
//! becomes a [`NewRecord`] ready for the repository.

use crate::cli::types::{EntityKind, OfficialTeamId, PlayerId, Sex, UserId, UserTeamId};
use crate::error::{FutebolError, Result};
use crate::storage::{
    NewOfficialTeam, NewPlayer, NewRecord, NewRosterEntry, NewUser, NewUserTeam, Password,
};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// User registration as typed by the caller
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub sex: String,
    pub phone: Option<String>,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub preferred_team: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OfficialTeamForm {
    pub name: String,
    pub short_code: String,
    pub short_label: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerForm {
    pub name: String,
    pub position: String,
    pub official_team_id: Option<OfficialTeamId>,
}

#[derive(Debug, Clone)]
pub struct UserTeamForm {
    pub name: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct RosterEntryForm {
    pub user_team_id: UserTeamId,
    pub player_id: PlayerId,
}

/// One registration request of any kind
#[derive(Debug, Clone)]
pub enum Registration {
    User(UserForm),
    OfficialTeam(OfficialTeamForm),
    Player(PlayerForm),
    UserTeam(UserTeamForm),
    RosterEntry(RosterEntryForm),
}

impl Registration {
    pub fn kind(&self) -> EntityKind {
        match self {
            Registration::User(_) => EntityKind::User,
            Registration::OfficialTeam(_) => EntityKind::OfficialTeam,
            Registration::Player(_) => EntityKind::Player,
            Registration::UserTeam(_) => EntityKind::UserTeam,
            Registration::RosterEntry(_) => EntityKind::RosterEntry,
        }
    }

    pub fn validate(self) -> Result<NewRecord> {
        match self {
            Registration::User(form) => form.validate().map(NewRecord::User),
            Registration::OfficialTeam(form) => form.validate().map(NewRecord::OfficialTeam),
            Registration::Player(form) => form.validate().map(NewRecord::Player),
            Registration::UserTeam(form) => form.validate().map(NewRecord::UserTeam),
            Registration::RosterEntry(form) => Ok(NewRecord::RosterEntry(NewRosterEntry {
                user_team_id: form.user_team_id,
                player_id: form.player_id,
            })),
        }
    }
}

impl UserForm {
    pub fn validate(&self) -> Result<NewUser> {
        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;
        validate_email(&email)?;

        if self.password.trim().is_empty() {
            return Err(FutebolError::validation("password", "is required"));
        }

        let sex: Sex = self.sex.parse()?;

        let birth_date = required("birth_date", &self.birth_date)?;
        let birth_date = NaiveDate::parse_from_str(&birth_date, DATE_FORMAT).map_err(|_| {
            FutebolError::validation(
                "birth_date",
                format!("'{}' is not a date in YYYY-MM-DD form", birth_date),
            )
        })?;

        Ok(NewUser {
            name,
            email,
            password: Password::new(self.password.clone()),
            sex,
            phone: optional(self.phone.as_deref()),
            birth_date,
            preferred_team: optional(self.preferred_team.as_deref()),
        })
    }
}

impl OfficialTeamForm {
    pub fn validate(&self) -> Result<NewOfficialTeam> {
        Ok(NewOfficialTeam {
            name: required("name", &self.name)?,
            // Short-codes are stored upper-cased, e.g. FUR, LOD
            short_code: required("short_code", &self.short_code)?.to_uppercase(),
            short_label: optional(self.short_label.as_deref()),
        })
    }
}

impl PlayerForm {
    pub fn validate(&self) -> Result<NewPlayer> {
        Ok(NewPlayer {
            name: required("name", &self.name)?,
            position: required("position", &self.position)?,
            official_team_id: self.official_team_id,
        })
    }
}

impl UserTeamForm {
    pub fn validate(&self) -> Result<NewUserTeam> {
        Ok(NewUserTeam {
            name: required("name", &self.name)?,
            user_id: self.user_id,
        })
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FutebolError::validation(field, "is required"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Blank optional input is stored as null
fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn validate_email(email: &str) -> Result<()> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(FutebolError::validation(
            "email",
            format!("'{}' is not an email address", email),
        )),
    }
}
