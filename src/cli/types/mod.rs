//! Type-safe wrappers and enums for futebol entities.

pub mod ids;
pub mod kind;
pub mod sex;

pub use ids::{OfficialTeamId, PlayerId, RosterEntryId, UserId, UserTeamId, MAX_ID};
pub use kind::{EntityKind, QueryName};
pub use sex::Sex;
