use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Assignment status value marking a profile assignment as active.
///
/// Only active assignments grant access; any other status string
/// (suspended, revoked, pending) is ignored by the gate.
pub const ASSIGNMENT_ACTIVE: &str = "ACTIF";

/// Bearer credential material issued by the sign-in endpoint.
///
/// # Security
///
/// Tokens are never logged; the `Debug` implementation redacts them.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Access token attached as `Authorization: Bearer` to every request
    pub access_token: String,
    /// Refresh token (persisted alongside, consumed by the server contract)
    pub refresh_token: String,
    /// When the access token expires (UTC)
    pub expires_at: DateTime<Utc>,
}

impl Credentials {
    /// Create a credential set expiring `expires_in` seconds from now.
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: Utc::now() + chrono::Duration::seconds(expires_in),
        }
    }

    /// Whether the access token is past its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

// Custom Debug implementation to avoid logging tokens
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Profile definition nested inside an assignment: the named role plus its
/// privilege and module grants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDefinition {
    pub name: String,
    #[serde(default)]
    pub privileges: Vec<String>,
    #[serde(default)]
    pub module_grants: Vec<String>,
}

/// A profile assigned to a user, with its own lifecycle status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAssignment {
    pub status: String,
    pub profile: ProfileDefinition,
}

impl ProfileAssignment {
    /// Only active assignments grant access.
    pub fn is_active(&self) -> bool {
        self.status == ASSIGNMENT_ACTIVE
    }
}

/// The identity record of the signed-in operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_assignments: Vec<ProfileAssignment>,
}

impl UserAccount {
    /// Whether any active assignment carries a profile named `role`.
    pub fn has_active_role(&self, role: &str) -> bool {
        self.profile_assignments
            .iter()
            .any(|a| a.is_active() && a.profile.name == role)
    }
}

/// Session gate state.
///
/// # State Transitions
///
/// ```text
/// Anonymous -> Authenticating -> Authenticated -> Anonymous (sign-out)
///      \________________________/^
///              (sign-in)
/// ```
///
/// `Authenticating` exists only transiently: a persisted credential was
/// restored but the identity record has not been confirmed yet. Navigation
/// must not redirect to sign-in while in this window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Anonymous => write!(f, "Anonymous"),
            SessionState::Authenticating => write!(f, "Authenticating"),
            SessionState::Authenticated => write!(f, "Authenticated"),
        }
    }
}

/// Immutable snapshot of the session, mutated only through the pure
/// transition functions below.
///
/// Invariant: `authenticated` is true iff `credentials` is present. The
/// transitions maintain it; nothing else writes these fields.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub authenticated: bool,
    pub credentials: Option<Credentials>,
    pub identity: Option<UserAccount>,
}

impl SessionSnapshot {
    /// The initial, signed-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Transition: explicit sign-in confirmed by the server.
    pub fn apply_sign_in(self, credentials: Credentials, identity: UserAccount) -> Self {
        Self {
            state: SessionState::Authenticated,
            authenticated: true,
            credentials: Some(credentials),
            identity: Some(identity),
        }
    }

    /// Transition: persisted material restored at process start.
    ///
    /// With a confirmed identity the session is authenticated outright;
    /// with a credential alone it enters the transient `Authenticating`
    /// window until [`SessionSnapshot::apply_identity_confirmed`] runs.
    pub fn apply_restore(credentials: Credentials, identity: Option<UserAccount>) -> Self {
        let state = if identity.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Authenticating
        };
        Self {
            state,
            authenticated: true,
            credentials: Some(credentials),
            identity,
        }
    }

    /// Transition: identity record confirmed for a restored credential.
    pub fn apply_identity_confirmed(self, identity: UserAccount) -> Self {
        Self {
            state: SessionState::Authenticated,
            identity: Some(identity),
            ..self
        }
    }

    /// Transition: explicit sign-out. Clears everything.
    pub fn apply_sign_out(self) -> Self {
        Self::anonymous()
    }

    /// The ambient credential, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.access_token.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("acc".to_string(), "ref".to_string(), 3600)
    }

    fn admin_account() -> UserAccount {
        UserAccount {
            id: "u-1".to_string(),
            username: "a.martin".to_string(),
            full_name: Some("A. Martin".to_string()),
            profile_assignments: vec![ProfileAssignment {
                status: ASSIGNMENT_ACTIVE.to_string(),
                profile: ProfileDefinition {
                    name: "ADMINISTRATEUR".to_string(),
                    privileges: vec!["GESTION_REFERENTIEL".to_string()],
                    module_grants: vec!["BILLETTERIE".to_string()],
                },
            }],
        }
    }

    #[test]
    fn test_credentials_debug_redacts() {
        let creds = credentials();
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("acc"));
    }

    #[test]
    fn test_credentials_expiry() {
        let fresh = credentials();
        assert!(!fresh.is_expired());

        let stale = Credentials {
            access_token: "t".to_string(),
            refresh_token: "r".to_string(),
            expires_at: Utc::now() - chrono::Duration::hours(1),
        };
        assert!(stale.is_expired());
    }

    #[test]
    fn test_active_role_matching() {
        let account = admin_account();
        assert!(account.has_active_role("ADMINISTRATEUR"));
        assert!(!account.has_active_role("SUPERVISEUR"));
    }

    #[test]
    fn test_inactive_assignment_grants_nothing() {
        let mut account = admin_account();
        account.profile_assignments[0].status = "SUSPENDU".to_string();
        assert!(!account.has_active_role("ADMINISTRATEUR"));
    }

    #[test]
    fn test_invariant_holds_across_transitions() {
        // authenticated == credentials.is_some() in every reachable snapshot
        let check = |s: &SessionSnapshot| assert_eq!(s.authenticated, s.credentials.is_some());

        let s0 = SessionSnapshot::anonymous();
        check(&s0);

        let s1 = s0.apply_sign_in(credentials(), admin_account());
        check(&s1);
        assert_eq!(s1.state, SessionState::Authenticated);

        let s2 = s1.apply_sign_out();
        check(&s2);
        assert_eq!(s2.state, SessionState::Anonymous);
        assert!(s2.identity.is_none());

        let s3 = SessionSnapshot::apply_restore(credentials(), None);
        check(&s3);
        assert_eq!(s3.state, SessionState::Authenticating);

        let s4 = s3.apply_identity_confirmed(admin_account());
        check(&s4);
        assert_eq!(s4.state, SessionState::Authenticated);

        let s5 = SessionSnapshot::apply_restore(credentials(), Some(admin_account()));
        check(&s5);
        assert_eq!(s5.state, SessionState::Authenticated);
    }

    #[test]
    fn test_user_account_wire_shape() {
        let json = r#"{
            "id": "7",
            "username": "c.dupont",
            "profileAssignments": [
                {
                    "status": "ACTIF",
                    "profile": {
                        "name": "ADMINISTRATEUR",
                        "privileges": ["GESTION_REFERENTIEL"],
                        "moduleGrants": ["BILLETTERIE"]
                    }
                }
            ]
        }"#;

        let account: UserAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.username, "c.dupont");
        assert!(account.full_name.is_none());
        assert!(account.has_active_role("ADMINISTRATEUR"));
    }
}
