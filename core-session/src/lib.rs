//! # Core Session
//!
//! Session management for the back-office client: sign-in/sign-out against
//! the REST API, credential persistence to durable local storage,
//! restore-on-start, and the navigation gate for administrative areas.
//!
//! ## Overview
//!
//! - [`SessionSnapshot`] holds `{state, authenticated, credentials,
//!   identity}` and is mutated only through its pure transition functions.
//!   Invariant: `authenticated` iff a credential is present.
//! - [`SessionStore`] persists credential material to the platform
//!   [`SecureStore`](bridge_traits::SecureStore) and the identity record to
//!   the [`SettingsStore`](bridge_traits::SettingsStore), so a process
//!   restart restores the session.
//! - [`SessionManager`] orchestrates the flows and emits
//!   [`SessionEvent`](core_runtime::events::SessionEvent)s.
//! - [`gate`] turns a snapshot plus a route classification into a
//!   proceed/redirect decision.

pub mod error;
pub mod gate;
pub mod manager;
pub mod store;
pub mod types;

pub use error::{Result, SessionError};
pub use gate::{decide, GateDecision, RouteClass};
pub use manager::SessionManager;
pub use store::SessionStore;
pub use types::{
    Credentials, ProfileAssignment, ProfileDefinition, SessionSnapshot, SessionState, UserAccount,
    ASSIGNMENT_ACTIVE,
};
