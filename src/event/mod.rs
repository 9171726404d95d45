use serde::{Deserialize, Deserializer};

use crate::auth::{AdminPolicy, SenderRole};
use crate::error::ParseError;
use crate::model::{GroupId, UserId};

/// One inbound chat message as delivered by the host, one JSON object per line.
///
/// Role fields are optional because hosts differ in what they report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InboundMessage {
    #[serde(deserialize_with = "id_string")]
    pub sender_id: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub is_admin: bool,
    pub text: String,
}

/// What the core needs to know about who sent a command and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContext {
    pub sender: UserId,
    pub sender_name: String,
    /// `None` for direct/private messages.
    pub group: Option<GroupId>,
    pub is_admin: bool,
}

impl ChatContext {
    pub fn new(sender: UserId, sender_name: impl Into<String>) -> Self {
        Self {
            sender,
            sender_name: sender_name.into(),
            group: None,
            is_admin: false,
        }
    }

    pub fn in_group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }

    pub fn as_admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}

fn is_elevated_label(label: Option<&str>) -> bool {
    label
        .map(|l| {
            let l = l.trim();
            l.eq_ignore_ascii_case("owner") || l.eq_ignore_ascii_case("admin")
        })
        .unwrap_or(false)
}

impl SenderRole for InboundMessage {
    fn is_elevated(&self) -> bool {
        self.is_owner
            || self.is_admin
            || is_elevated_label(self.role.as_deref())
            || is_elevated_label(self.permission.as_deref())
    }
}

impl InboundMessage {
    /// Parse one line of host input.
    pub fn from_json_line(line: &str) -> Result<Self, ParseError> {
        serde_json::from_str(line).map_err(|e| ParseError::Json(e.to_string()))
    }

    /// Project into the core's chat context, deciding admin rights here.
    pub fn context(&self, policy: &AdminPolicy) -> Result<ChatContext, ParseError> {
        let sender = UserId::parse(self.sender_id.as_str())
            .ok_or_else(|| ParseError::InvalidFormat("blank sender_id".to_string()))?;
        let sender_name = if self.sender_name.trim().is_empty() {
            sender.to_string()
        } else {
            self.sender_name.trim().to_string()
        };
        let is_admin = policy.has_admin_rights(&sender, self);
        Ok(ChatContext {
            sender,
            sender_name,
            group: self.group_id.as_deref().and_then(GroupId::parse),
            is_admin,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

// Chat platforms send numeric ids as either JSON numbers or strings.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}
