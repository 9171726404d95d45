use serde::{Deserialize, Serialize};

use super::session::Session;
use super::session_map::SessionMap;
use crate::error::CommandError;

/// Outcome of resolving which session a command targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    /// No name given, no usable active session, and several sessions exist.
    Ambiguous,
    NotFound,
}

impl Resolution {
    pub fn found(self) -> Result<String, CommandError> {
        match self {
            Resolution::Found(name) => Ok(name),
            Resolution::Ambiguous | Resolution::NotFound => Err(CommandError::NotFound),
        }
    }
}

/// All sessions of one scope, in creation order, plus the default-target pointer.
///
/// `active` may go stale after a reset; lookups treat a stale name as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeState {
    #[serde(default)]
    pub sessions: SessionMap,
    #[serde(default)]
    pub active: String,
}

impl ScopeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the target session:
    /// 1. an explicit name must match exactly;
    /// 2. otherwise the active session, if it still exists;
    /// 3. otherwise the only session in the scope;
    /// 4. otherwise nothing.
    pub fn resolve(&self, name: Option<&str>) -> Resolution {
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            return if self.sessions.contains_key(name) {
                Resolution::Found(name.to_string())
            } else {
                Resolution::NotFound
            };
        }
        if !self.active.is_empty() && self.sessions.contains_key(&self.active) {
            return Resolution::Found(self.active.clone());
        }
        match self.sessions.len() {
            0 => Resolution::NotFound,
            1 => self
                .sessions
                .keys()
                .next()
                .map(|k| Resolution::Found(k.to_string()))
                .unwrap_or(Resolution::NotFound),
            _ => Resolution::Ambiguous,
        }
    }

    /// Resolve and borrow the target session mutably.
    pub fn session_mut(&mut self, name: Option<&str>) -> Result<(String, &mut Session), CommandError> {
        let name = self.resolve(name).found()?;
        let session = self.sessions.get_mut(&name).ok_or(CommandError::NotFound)?;
        Ok((name, session))
    }

    pub fn session(&self, name: Option<&str>) -> Result<(String, &Session), CommandError> {
        let name = self.resolve(name).found()?;
        let session = self.sessions.get(&name).ok_or(CommandError::NotFound)?;
        Ok((name, session))
    }

    /// Insert a new session and make it active. Names are unique per scope.
    pub fn create_session(&mut self, name: &str, session: Session) -> Result<(), CommandError> {
        if self.sessions.contains_key(name) {
            return Err(CommandError::Conflict {
                name: name.to_string(),
            });
        }
        self.sessions.insert(name.to_string(), session);
        self.active = name.to_string();
        Ok(())
    }

    pub fn switch_active(&mut self, name: &str) -> Result<(), CommandError> {
        if !self.sessions.contains_key(name) {
            return Err(CommandError::NotFound);
        }
        self.active = name.to_string();
        Ok(())
    }

    /// Remove the named session, or the active one when no name is given.
    ///
    /// Returns the removed session name. Missing targets are not an error;
    /// `active` is left pointing at the removed name.
    pub fn reset(&mut self, name: Option<&str>) -> Option<String> {
        let target = match name.filter(|n| !n.is_empty()) {
            Some(n) => n.to_string(),
            None if self.active.is_empty() => return None,
            None => self.active.clone(),
        };
        self.sessions.remove(&target).map(|_| target)
    }

    pub fn is_active(&self, name: &str) -> bool {
        !self.active.is_empty() && self.active == name
    }
}
