//! Shared serde utilities for domain models

/// Teams as a JSON object keyed by team name, preserving insertion order.
///
/// A duplicated key keeps its first position and takes the later member list.
pub mod ordered_teams {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    use crate::model::session::Team;
    use crate::model::UserId;

    pub fn serialize<S>(teams: &[Team], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(teams.len()))?;
        for team in teams {
            map.serialize_entry(&team.name, &team.members)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Team>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TeamsVisitor)
    }

    struct TeamsVisitor;

    impl<'de> Visitor<'de> for TeamsVisitor {
        type Value = Vec<Team>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of team name to member list")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut teams: Vec<Team> = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, members)) = access.next_entry::<String, Vec<UserId>>()? {
                match teams.iter_mut().find(|t| t.name == name) {
                    Some(existing) => existing.members = members,
                    None => teams.push(Team::new(name, members)),
                }
            }
            Ok(teams)
        }
    }
}

/// Scope map that skips entries whose key is not a valid scope id.
///
/// One unknown key (written by another build, or edited by hand) drops that
/// scope with a warning instead of failing the whole document.
pub mod lenient_scopes {
    use serde::de::{IgnoredAny, MapAccess, Visitor};
    use serde::Deserializer;
    use std::collections::BTreeMap;
    use std::fmt;

    use crate::model::{ScopeId, ScopeState};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<ScopeId, ScopeState>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ScopesVisitor)
    }

    struct ScopesVisitor;

    impl<'de> Visitor<'de> for ScopesVisitor {
        type Value = BTreeMap<ScopeId, ScopeState>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of scope key to scope state")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut scopes = BTreeMap::new();
            while let Some(key) = access.next_key::<String>()? {
                match key.parse::<ScopeId>() {
                    Ok(scope) => {
                        let state = access.next_value::<ScopeState>()?;
                        scopes.insert(scope, state);
                    }
                    Err(reason) => {
                        tracing::warn!(key = %key, %reason, "skipping scope with unknown key");
                        access.next_value::<IgnoredAny>()?;
                    }
                }
            }
            Ok(scopes)
        }
    }
}
