//! ID types for the five entity kinds.

use crate::error::{FutebolError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest id any backend can hold; SQLite integers are signed 64-bit
pub const MAX_ID: u64 = i64::MAX as u64;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = FutebolError;

            fn from_str(s: &str) -> Result<Self> {
                let id: u64 = s.trim().parse().map_err(|_| {
                    FutebolError::validation(stringify!($name), format!("'{}' is not a valid id", s))
                })?;
                if id == 0 {
                    return Err(FutebolError::validation(
                        stringify!($name),
                        "ids start at 1",
                    ));
                }
                if id > MAX_ID {
                    return Err(FutebolError::validation(
                        stringify!($name),
                        format!("ids stop at {}", MAX_ID),
                    ));
                }
                Ok(Self(id))
            }
        }
    };
}

entity_id!(
    /// Type-safe wrapper for User IDs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futebol_app::UserId;
    ///
    /// let id: UserId = "7".parse().unwrap();
    /// assert_eq!(id.as_u64(), 7);
    /// assert_eq!(id.to_string(), "7");
    /// ```
    UserId
);

entity_id!(
    /// Type-safe wrapper for Official Team IDs
    OfficialTeamId
);

entity_id!(
    /// Type-safe wrapper for Player IDs
    PlayerId
);

entity_id!(
    /// Type-safe wrapper for User Team IDs
    UserTeamId
);

entity_id!(
    /// Type-safe wrapper for Roster Entry IDs
    RosterEntryId
);
