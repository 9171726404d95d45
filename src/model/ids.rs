use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                let id = s.into();
                assert!(!id.is_empty(), "{} cannot be empty", stringify!($name));
                Self(id)
            }

            /// Non-panicking constructor for identifiers arriving from the wire.
            pub fn parse(s: impl Into<String>) -> Option<Self> {
                let id = s.into();
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Self(trimmed.to_string()))
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(GroupId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "UserId cannot be empty")]
    fn user_id_empty_string_panics() {
        UserId::new("");
    }

    #[test]
    #[should_panic(expected = "GroupId cannot be empty")]
    fn group_id_empty_string_panics() {
        GroupId::new("");
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(UserId::parse("   ").is_none());
        assert!(GroupId::parse("").is_none());
    }

    #[test]
    fn parse_trims_whitespace() {
        let id = UserId::parse(" 10001 ").unwrap();
        assert_eq!(id.as_str(), "10001");
    }

    #[test]
    fn user_id_from_str() {
        let id: UserId = "u1".into();
        assert_eq!(id.as_str(), "u1");
        assert_eq!(id.to_string(), "u1");
    }

    #[test]
    fn user_id_serializes_transparently() {
        let id = UserId::new("42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }
}
