use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::GroupId;
use crate::error::CommandError;

const GLOBAL_KEY: &str = "global";
const GROUP_PREFIX: &str = "group:";

/// Isolation boundary for sessions. Serialized as `"global"` or `"group:<id>"`
/// so it can be used directly as a JSON object key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ScopeId {
    Global,
    PerGroup(GroupId),
}

impl ScopeId {
    pub fn is_global(&self) -> bool {
        matches!(self, ScopeId::Global)
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeId::Global => f.write_str(GLOBAL_KEY),
            ScopeId::PerGroup(gid) => write!(f, "{}{}", GROUP_PREFIX, gid),
        }
    }
}

impl From<ScopeId> for String {
    fn from(scope: ScopeId) -> Self {
        scope.to_string()
    }
}

impl TryFrom<String> for ScopeId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for ScopeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == GLOBAL_KEY {
            return Ok(ScopeId::Global);
        }
        s.strip_prefix(GROUP_PREFIX)
            .and_then(GroupId::parse)
            .map(ScopeId::PerGroup)
            .ok_or_else(|| format!("invalid scope key: {:?}", s))
    }
}

/// The trailing scope token a command may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeKeyword {
    #[default]
    ThisGroup,
    CrossGroup,
}

impl ScopeKeyword {
    pub const THIS_GROUP: &'static str = "this-group";
    pub const CROSS_GROUP: &'static str = "cross-group";

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            Self::THIS_GROUP => Some(ScopeKeyword::ThisGroup),
            Self::CROSS_GROUP => Some(ScopeKeyword::CrossGroup),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKeyword::ThisGroup => Self::THIS_GROUP,
            ScopeKeyword::CrossGroup => Self::CROSS_GROUP,
        }
    }

    /// Resolve against the group the command arrived in.
    ///
    /// `CrossGroup` always yields `Global`. `ThisGroup` needs a group context;
    /// a direct message fails with `ScopeUnavailable`.
    pub fn resolve(self, group: Option<&GroupId>) -> Result<ScopeId, CommandError> {
        match self {
            ScopeKeyword::CrossGroup => Ok(ScopeId::Global),
            ScopeKeyword::ThisGroup => group
                .cloned()
                .map(ScopeId::PerGroup)
                .ok_or(CommandError::ScopeUnavailable),
        }
    }
}

impl fmt::Display for ScopeKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Consume a trailing scope keyword, if the last token is exactly one.
pub fn split_scope_keyword(tokens: &mut Vec<String>) -> ScopeKeyword {
    match tokens.last().and_then(|t| ScopeKeyword::from_token(t)) {
        Some(keyword) => {
            tokens.pop();
            keyword
        }
        None => ScopeKeyword::default(),
    }
}
