use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::session::Session;

/// Sessions of one scope keyed by name, kept in creation order.
///
/// Serialized as a JSON object whose key order is the creation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionMap {
    entries: Vec<(String, Session)>,
}

impl SessionMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Session> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Session> {
        self.position(name).map(|i| &mut self.entries[i].1)
    }

    /// Insert at the end, or replace in place when the name exists.
    /// Returns the replaced session.
    pub fn insert(&mut self, name: impl Into<String>, session: Session) -> Option<Session> {
        let name = name.into();
        match self.position(&name) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, session)),
            None => {
                self.entries.push((name, session));
                None
            }
        }
    }

    /// Remove a session; the rest keep their relative order.
    pub fn remove(&mut self, name: &str) -> Option<Session> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Session)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Session> {
        self.entries.iter_mut().map(|(_, s)| s)
    }
}

impl Serialize for SessionMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, session) in &self.entries {
            map.serialize_entry(name, session)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SessionMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SessionMapVisitor)
    }
}

struct SessionMapVisitor;

impl<'de> Visitor<'de> for SessionMapVisitor {
    type Value = SessionMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of session name to session")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut sessions = SessionMap::new();
        while let Some((name, session)) = access.next_entry::<String, Session>()? {
            sessions.insert(name, session);
        }
        Ok(sessions)
    }
}
