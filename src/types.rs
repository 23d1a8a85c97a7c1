//! Shared enumerations used by the models, DTOs and tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix carried by role authorities inside tokens (`ROLE_ADMINISTRATOR`)
pub const ROLE_PREFIX: &str = "ROLE_";

#[derive(Debug, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// User roles. Stored as their upper-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Administrator,
    Simple,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "ADMINISTRATOR",
            Role::Simple => "SIMPLE",
        }
    }

    /// Authority string as carried in the `roles` claim
    pub fn authority(&self) -> String {
        format!("{}{}", ROLE_PREFIX, self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(ROLE_PREFIX).unwrap_or(s) {
            "ADMINISTRATOR" => Ok(Role::Administrator),
            "SIMPLE" => Ok(Role::Simple),
            _ => Err(ParseEnumError { kind: "role", value: s.to_string() }),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Lifecycle state shared by requests and their stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestState {
    Open,
    InProgress,
    Closed,
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Open => "OPEN",
            RequestState::InProgress => "IN_PROGRESS",
            RequestState::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestState {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(RequestState::Open),
            "IN_PROGRESS" => Ok(RequestState::InProgress),
            "CLOSED" => Ok(RequestState::Closed),
            _ => Err(ParseEnumError { kind: "request state", value: s.to_string() }),
        }
    }
}

impl TryFrom<String> for RequestState {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_authority_round_trips_through_parse() {
        let authority = Role::Administrator.authority();
        assert_eq!(authority, "ROLE_ADMINISTRATOR");
        assert_eq!(authority.parse::<Role>().unwrap(), Role::Administrator);
        assert_eq!("SIMPLE".parse::<Role>().unwrap(), Role::Simple);
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!("ROOT".parse::<Role>().is_err());
        assert!("PENDING".parse::<RequestState>().is_err());
    }

    #[test]
    fn enums_serialize_as_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&RequestState::InProgress).unwrap(), "\"IN_PROGRESS\"");
        assert_eq!(serde_json::to_string(&Role::Administrator).unwrap(), "\"ADMINISTRATOR\"");
    }
}
