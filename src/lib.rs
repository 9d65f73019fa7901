//! Workspace placeholder crate.
//!
//! This crate exists so host applications can depend on
//! `backoffice-workspace` and reach the façade without wiring each workspace
//! crate individually.

pub use core_service::{BackOfficeCore, CoreError, Result};
