//! Access policy - the pure authorization decision function.
//!
//! No I/O happens here. Callers resolve the actor (a live user record)
//! and load the target resource first, then ask for a decision.

use uuid::Uuid;

use crate::domain::Role;

/// Action attempted against an owned resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Like,
    View,
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Role gate: allow iff the actor's role belongs to the allowed set.
pub fn role_gate(role: Role, allowed: &[Role]) -> Decision {
    if allowed.contains(&role) {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// Decide whether `actor` may perform `action` on a resource owned by
/// `owner`.
///
/// Updates are owner-only: admins hold no special update privilege.
/// Deletes extend to admins through the role gate.
pub fn decide(actor_role: Role, actor_id: Uuid, owner_id: Uuid, action: Action) -> Decision {
    match action {
        Action::Read | Action::View => Decision::Allow,
        // The caller proves authentication by having an actor id at all.
        Action::Create | Action::Like => Decision::Allow,
        Action::Update => {
            if actor_id == owner_id {
                Decision::Allow
            } else {
                Decision::Deny
            }
        }
        Action::Delete => {
            if actor_id == owner_id {
                Decision::Allow
            } else {
                role_gate(actor_role, &[Role::Admin])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_may_update_and_delete() {
        let owner = Uuid::new_v4();
        assert!(decide(Role::User, owner, owner, Action::Update).is_allowed());
        assert!(decide(Role::User, owner, owner, Action::Delete).is_allowed());
    }

    #[test]
    fn stranger_may_neither_update_nor_delete() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        assert_eq!(decide(Role::User, stranger, owner, Action::Update), Decision::Deny);
        assert_eq!(decide(Role::User, stranger, owner, Action::Delete), Decision::Deny);
    }

    #[test]
    fn admin_may_delete_but_not_update() {
        let owner = Uuid::new_v4();
        let admin = Uuid::new_v4();
        assert_eq!(decide(Role::Admin, admin, owner, Action::Delete), Decision::Allow);
        assert_eq!(decide(Role::Admin, admin, owner, Action::Update), Decision::Deny);
    }

    #[test]
    fn reads_and_engagement_are_open() {
        let owner = Uuid::new_v4();
        let anyone = Uuid::new_v4();
        assert!(decide(Role::User, anyone, owner, Action::Read).is_allowed());
        assert!(decide(Role::User, anyone, owner, Action::View).is_allowed());
        assert!(decide(Role::User, anyone, owner, Action::Like).is_allowed());
        assert!(decide(Role::User, anyone, owner, Action::Create).is_allowed());
    }

    #[test]
    fn role_gate_checks_set_membership() {
        assert_eq!(role_gate(Role::Admin, &[Role::Admin]), Decision::Allow);
        assert_eq!(role_gate(Role::User, &[Role::Admin]), Decision::Deny);
        assert_eq!(role_gate(Role::User, &[Role::User, Role::Admin]), Decision::Allow);
        assert_eq!(role_gate(Role::Admin, &[]), Decision::Deny);
    }
}
