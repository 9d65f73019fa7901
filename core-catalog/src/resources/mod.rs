//! # Reference-Data Families
//!
//! One module per family managed by the back office. Each defines the
//! entity exactly as the server returns it, the create/update payloads, and
//! the [`ResourceDescriptor`](crate::resource::ResourceDescriptor) binding
//! the family to the generic synchronizer.
//!
//! ## Available Families
//!
//! - `supplier` - Airlines and service suppliers
//! - `mile_tier` - Loyalty-mile award tiers per revenue range
//! - `document_template` - Printable document templates (file-bearing)
//! - `functional_module` - Functional modules of the console
//! - `transaction_rule` - Workflow rules per transaction type

pub mod document_template;
pub mod functional_module;
pub mod mile_tier;
pub mod supplier;
pub mod transaction_rule;

pub use document_template::{DocumentBlob, DocumentTemplate, DocumentTemplates, TemplatePayload};
pub use functional_module::{FunctionalModule, FunctionalModules, ModulePayload};
pub use mile_tier::{MileTier, MileTierPayload, MileTiers};
pub use supplier::{Supplier, SupplierPayload, Suppliers};
pub use transaction_rule::{TransactionRule, TransactionRulePayload, TransactionRules};

/// Lifecycle status wire values shared by the families.
///
/// The set is closed but carried as plain strings: each family's server-side
/// enum owns the authoritative values, and the client never transitions a
/// status locally.
pub mod status {
    pub const CREATED: &str = "CREE";
    pub const ACTIVE: &str = "ACTIF";
    pub const INACTIVE: &str = "INACTIF";
}
