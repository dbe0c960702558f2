//! # Swatch Export
//!
//! Entitlement checks and the export gate.
//!
//! Viewing and editing a template is open to everyone; taking the code out
//! of the system as a standalone file requires an admin role or an active
//! subscription. The gate is meant to run at the boundary that owns the
//! template store. A client-side check alone is worthless, since a client
//! that can reach the store can skip it.
//!
//! ```rust,ignore
//! use swatch_export::ExportGate;
//!
//! let gate = ExportGate::new(store);
//! let artifact = gate.request_export(TemplateId(1), &ctx).await?;
//! ```

mod entitlement;
mod gate;

pub use entitlement::{evaluate, Decision, DecisionReason, DenialReason, ExportGrant};
pub use gate::{export_filename, ExportArtifact, ExportError, ExportGate, EXPORT_MIME_TYPE};
