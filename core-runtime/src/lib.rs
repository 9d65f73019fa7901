//! # Core Runtime
//!
//! Shared runtime infrastructure for the back-office client core:
//! configuration, the event bus, and logging bootstrap.
//!
//! - [`config::CoreConfig`] - fail-fast configuration of bridges and settings
//! - [`events::EventBus`] - broadcast channel for session and catalog events
//! - [`logging::init_logging`] - `tracing` subscriber setup

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{Error, Result};
pub use events::{CatalogEvent, CoreEvent, EventBus, MutationKind, SessionEvent};
pub use logging::{init_logging, LogFormat, LoggingConfig};
