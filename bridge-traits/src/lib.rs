//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host.
//!
//! ## Overview
//!
//! This crate defines the contract between the core library and
//! platform-specific implementations. Each trait represents a capability the
//! core requires but that must be implemented differently per host (desktop
//! shell, test harness, embedded web view).
//!
//! ## Traits
//!
//! ### Networking
//! - [`HttpClient`](http::HttpClient) - Async HTTP with bearer auth, JSON and multipart bodies
//!
//! ### Security & Storage
//! - [`SecureStore`](storage::SecureStore) - Credential persistence (Keychain/DPAPI/Secret Service)
//! - [`SettingsStore`](storage::SettingsStore) - Durable key-value local storage
//!
//! ### Host Integration
//! - [`AuditTrailViewer`](viewer::AuditTrailViewer) - External audit/history screen
//! - [`AuthorizationViewer`](viewer::AuthorizationViewer) - External privilege-matrix screen
//!
//! ## Fail-Fast Strategy
//!
//! The core fails fast with descriptive errors when a required capability is
//! missing; see `core_runtime::config`.
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Platform
//! implementations should convert platform-specific errors to `BridgeError`
//! and provide actionable messages.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks.

pub mod error;
pub mod http;
pub mod storage;
pub mod viewer;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpBody, HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm, MultipartPart};
pub use storage::{SecureStore, SettingsStore};
pub use viewer::{AuditTrailViewer, AuthorizationViewer};
