//! Validated usernames.
//!
//! A username doubles as the name of the user's storage directory, so only a
//! conservative set of characters is accepted. Separators, dots and anything
//! else that could escape the data directory are rejected.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Maximum username length in characters
pub const MAX_LEN: usize = 64;

/// Errors that can occur when parsing a username
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username cannot be empty")]
    Empty,

    #[error("Username is too long: {0} characters (max {})", MAX_LEN)]
    TooLong(usize),

    #[error("Invalid character {0:?} in username. Use letters, digits, '-' or '_'")]
    InvalidCharacter(char),

    #[error("Username cannot start with '-'")]
    LeadingDash,
}

/// A directory-safe user identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Username(String);

impl Username {
    /// Parse and validate a username. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(UsernameError::Empty);
        }

        let len = s.chars().count();
        if len > MAX_LEN {
            return Err(UsernameError::TooLong(len));
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(UsernameError::InvalidCharacter(c));
        }

        if s.starts_with('-') {
            return Err(UsernameError::LeadingDash);
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Username {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        for name in ["alice", "Bob_2", "x", "gym-rat", "_hidden"] {
            assert_eq!(Username::parse(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(Username::parse("  alice \n").unwrap().as_str(), "alice");
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Username::parse(""), Err(UsernameError::Empty));
        assert_eq!(Username::parse("   "), Err(UsernameError::Empty));
    }

    #[test]
    fn test_path_components_rejected() {
        assert_eq!(
            Username::parse("../etc"),
            Err(UsernameError::InvalidCharacter('.'))
        );
        assert_eq!(
            Username::parse("a/b"),
            Err(UsernameError::InvalidCharacter('/'))
        );
        assert_eq!(
            Username::parse("a\\b"),
            Err(UsernameError::InvalidCharacter('\\'))
        );
        assert!(Username::parse("..").is_err());
    }

    #[test]
    fn test_leading_dash_rejected() {
        assert_eq!(Username::parse("-rf"), Err(UsernameError::LeadingDash));
    }

    #[test]
    fn test_too_long_rejected() {
        let name = "a".repeat(MAX_LEN + 1);
        assert_eq!(Username::parse(&name), Err(UsernameError::TooLong(MAX_LEN + 1)));
        assert!(Username::parse(&"a".repeat(MAX_LEN)).is_ok());
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let mut names: Vec<Username> = ["carol", "alice", "bob"]
            .iter()
            .map(|n| n.parse().unwrap())
            .collect();
        names.sort();
        let names: Vec<&str> = names.iter().map(Username::as_str).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<Username>("\"alice\"").is_ok());
        assert!(serde_json::from_str::<Username>("\"a/b\"").is_err());
    }
}
