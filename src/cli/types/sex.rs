//! User sex codes.

use crate::error::FutebolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sex recorded on a user: `M`, `F` or `O`.
///
/// # Examples
///
/// ```rust
/// use futebol_app::Sex;
///
/// let sex: Sex = "f".parse().unwrap();
/// assert_eq!(sex, Sex::Female);
/// assert_eq!(sex.to_string(), "F");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

impl Sex {
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Other => "O",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Sex {
    type Err = FutebolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            "O" => Ok(Sex::Other),
            _ => Err(FutebolError::validation(
                "sex",
                format!("'{}' is not one of M, F, O", s.trim()),
            )),
        }
    }
}
