//! # Session Gate
//!
//! Decides, for a navigation target, whether the requester may proceed,
//! must be redirected to sign-in, or must be redirected away from a
//! restricted area. The decision is a pure function of the session snapshot
//! and the target classification; routing mechanics stay in the host UI.

use crate::types::{SessionSnapshot, SessionState};

/// Classification of a navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteClass {
    /// Public areas (sign-in screen). Redirect away when already
    /// authenticated.
    Public,
    /// The non-administrative landing route. Always reachable.
    Landing,
    /// Administrative areas, gated on an active profile whose name matches
    /// the required role.
    Restricted { role: String },
}

impl RouteClass {
    pub fn restricted(role: impl Into<String>) -> Self {
        RouteClass::Restricted { role: role.into() }
    }
}

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToSignIn,
    RedirectToLanding,
}

/// Decide whether navigation to `target` may proceed.
///
/// Rules:
/// - Restricted areas require `Authenticated` and at least one active
///   profile assignment whose profile name matches the required role;
///   authenticated operators without the role are sent to the landing route.
/// - While `Authenticating` (persisted credential, identity unconfirmed)
///   navigation is allowed through; redirecting to sign-in here would bounce
///   an operator whose session is about to be confirmed. The gate runs again
///   once the state settles.
/// - Public areas redirect away from themselves when already authenticated.
pub fn decide(snapshot: &SessionSnapshot, target: &RouteClass) -> GateDecision {
    match target {
        RouteClass::Landing => GateDecision::Allow,
        RouteClass::Public => match snapshot.state {
            SessionState::Authenticated => GateDecision::RedirectToLanding,
            SessionState::Anonymous | SessionState::Authenticating => GateDecision::Allow,
        },
        RouteClass::Restricted { role } => match snapshot.state {
            SessionState::Anonymous => GateDecision::RedirectToSignIn,
            SessionState::Authenticating => GateDecision::Allow,
            SessionState::Authenticated => {
                let holds_role = snapshot
                    .identity
                    .as_ref()
                    .map(|identity| identity.has_active_role(role))
                    .unwrap_or(false);
                if holds_role {
                    GateDecision::Allow
                } else {
                    GateDecision::RedirectToLanding
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Credentials, ProfileAssignment, ProfileDefinition, UserAccount, ASSIGNMENT_ACTIVE,
    };

    fn credentials() -> Credentials {
        Credentials::new("tok".to_string(), "ref".to_string(), 3600)
    }

    fn account_with(status: &str, role: &str) -> UserAccount {
        UserAccount {
            id: "u-1".to_string(),
            username: "c.dupont".to_string(),
            full_name: None,
            profile_assignments: vec![ProfileAssignment {
                status: status.to_string(),
                profile: ProfileDefinition {
                    name: role.to_string(),
                    privileges: vec![],
                    module_grants: vec![],
                },
            }],
        }
    }

    fn authenticated(account: UserAccount) -> SessionSnapshot {
        SessionSnapshot::anonymous().apply_sign_in(credentials(), account)
    }

    #[test]
    fn test_anonymous_blocked_from_restricted() {
        let snapshot = SessionSnapshot::anonymous();
        assert_eq!(
            decide(&snapshot, &RouteClass::restricted("ADMINISTRATEUR")),
            GateDecision::RedirectToSignIn
        );
    }

    #[test]
    fn test_admin_allowed_into_restricted() {
        let snapshot = authenticated(account_with(ASSIGNMENT_ACTIVE, "ADMINISTRATEUR"));
        assert_eq!(
            decide(&snapshot, &RouteClass::restricted("ADMINISTRATEUR")),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_wrong_role_redirected_to_landing() {
        let snapshot = authenticated(account_with(ASSIGNMENT_ACTIVE, "AGENT"));
        assert_eq!(
            decide(&snapshot, &RouteClass::restricted("ADMINISTRATEUR")),
            GateDecision::RedirectToLanding
        );
    }

    #[test]
    fn test_inactive_assignment_redirected_to_landing() {
        let snapshot = authenticated(account_with("SUSPENDU", "ADMINISTRATEUR"));
        assert_eq!(
            decide(&snapshot, &RouteClass::restricted("ADMINISTRATEUR")),
            GateDecision::RedirectToLanding
        );
    }

    #[test]
    fn test_authenticating_window_not_redirected() {
        let snapshot = SessionSnapshot::apply_restore(credentials(), None);
        assert_eq!(snapshot.state, SessionState::Authenticating);
        assert_eq!(
            decide(&snapshot, &RouteClass::restricted("ADMINISTRATEUR")),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_public_redirects_authenticated_away() {
        let snapshot = authenticated(account_with(ASSIGNMENT_ACTIVE, "ADMINISTRATEUR"));
        assert_eq!(
            decide(&snapshot, &RouteClass::Public),
            GateDecision::RedirectToLanding
        );
    }

    #[test]
    fn test_public_open_to_anonymous() {
        let snapshot = SessionSnapshot::anonymous();
        assert_eq!(decide(&snapshot, &RouteClass::Public), GateDecision::Allow);
    }

    #[test]
    fn test_landing_always_reachable() {
        assert_eq!(
            decide(&SessionSnapshot::anonymous(), &RouteClass::Landing),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_sign_out_then_restricted_redirects_to_sign_in() {
        let snapshot = authenticated(account_with(ASSIGNMENT_ACTIVE, "ADMINISTRATEUR"));
        let signed_out = snapshot.apply_sign_out();
        assert_eq!(
            decide(&signed_out, &RouteClass::restricted("ADMINISTRATEUR")),
            GateDecision::RedirectToSignIn
        );
    }
}
