use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::CommandError;
use crate::model::{ScopeId, ScopeState, UserId};

/// Current on-disk schema version.
pub const STATE_VERSION: u32 = 1;

/// Longest accepted nickname, in characters.
pub const MAX_NICKNAME_CHARS: usize = 20;

fn default_version() -> u32 {
    STATE_VERSION
}

/// Everything teamup remembers: sessions per scope plus the global nickname
/// registry. Owned by one service instance and saved whole after each mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamupState {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, deserialize_with = "crate::model::serde_utils::lenient_scopes::deserialize")]
    pub scopes: BTreeMap<ScopeId, ScopeState>,
    #[serde(default)]
    pub nicknames: BTreeMap<UserId, String>,
}

impl Default for TeamupState {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamupState {
    pub fn new() -> Self {
        Self {
            version: STATE_VERSION,
            scopes: BTreeMap::new(),
            nicknames: BTreeMap::new(),
        }
    }

    /// Scope state for `scope`, created empty on first access.
    pub fn scope_mut(&mut self, scope: &ScopeId) -> &mut ScopeState {
        self.scopes.entry(scope.clone()).or_default()
    }

    pub fn scope(&self, scope: &ScopeId) -> Option<&ScopeState> {
        self.scopes.get(scope)
    }

    /// Register a display nickname. Latest write wins.
    pub fn set_nickname(&mut self, user: &UserId, name: &str) -> Result<String, CommandError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CommandError::InvalidArgument {
                usage: crate::app::command::usage::SET_NICKNAME,
            });
        }
        if name.chars().count() > MAX_NICKNAME_CHARS {
            return Err(CommandError::NicknameTooLong {
                max: MAX_NICKNAME_CHARS,
            });
        }
        self.nicknames.insert(user.clone(), name.to_string());
        Ok(name.to_string())
    }

    pub fn nickname(&self, user: &UserId) -> Option<&str> {
        self.nicknames.get(user).map(String::as_str)
    }

    /// Nickname if registered, else `fallback`. In the global scope the raw
    /// user id is appended so same-named users from different groups differ.
    pub fn display_name(&self, user: &UserId, fallback: &str, scope: &ScopeId) -> String {
        let base = self.nickname(user).unwrap_or(fallback);
        if scope.is_global() {
            format!("{}({})", base, user)
        } else {
            base.to_string()
        }
    }

    /// Restore session invariants after loading. Returns the number of repairs.
    pub fn repair(&mut self) -> usize {
        self.scopes
            .values_mut()
            .flat_map(|scope| scope.sessions.values_mut())
            .map(|session| session.repair())
            .sum()
    }
}
