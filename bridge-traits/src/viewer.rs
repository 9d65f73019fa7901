//! Host Viewer Integrations
//!
//! The back office delegates two read-only screens to external
//! collaborators supplied by the host application: the audit/history viewer
//! and the module-to-privilege authorization viewer. The core invokes them
//! by resource name and entity id only; it neither fetches nor renders
//! their content.

/// Opens the audit trail for a single entity.
pub trait AuditTrailViewer: Send + Sync {
    /// Show the change history of `entity_id` within `resource`
    /// (e.g. `("fournisseurs", "42")`).
    fn open_history(&self, resource: &str, entity_id: &str);
}

/// Opens the privilege matrix for a functional module.
pub trait AuthorizationViewer: Send + Sync {
    /// Show which profiles hold which privileges on `module_name`.
    fn open_module_privileges(&self, module_name: &str);
}
