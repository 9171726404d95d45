use std::collections::BTreeSet;

use crate::model::UserId;

/// Host-platform view of a message sender's chat role.
///
/// Implemented once per host adapter; the core only ever asks the yes/no question.
pub trait SenderRole {
    /// Sender is an owner or administrator of the chat it wrote in.
    fn is_elevated(&self) -> bool;
}

/// Who may run admin-only commands: configured super-admins, plus anyone the
/// host platform reports as elevated.
#[derive(Debug, Clone, Default)]
pub struct AdminPolicy {
    super_admins: BTreeSet<UserId>,
}

impl AdminPolicy {
    pub fn new(super_admins: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            super_admins: super_admins.into_iter().collect(),
        }
    }

    pub fn is_super_admin(&self, user: &UserId) -> bool {
        self.super_admins.contains(user)
    }

    pub fn has_admin_rights(&self, user: &UserId, role: &dyn SenderRole) -> bool {
        self.is_super_admin(user) || role.is_elevated()
    }

    pub fn super_admin_count(&self) -> usize {
        self.super_admins.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(bool);

    impl SenderRole for Fixed {
        fn is_elevated(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn super_admin_needs_no_role() {
        let policy = AdminPolicy::new([UserId::new("root")]);
        assert!(policy.has_admin_rights(&UserId::new("root"), &Fixed(false)));
    }

    #[test]
    fn elevated_role_grants_rights() {
        let policy = AdminPolicy::default();
        assert!(policy.has_admin_rights(&UserId::new("u1"), &Fixed(true)));
        assert!(!policy.has_admin_rights(&UserId::new("u1"), &Fixed(false)));
    }
}
