//! # Swatch Editor
//!
//! Scratch editing of template fragments.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ store: canonical template fragments         │
//! └─────────────────────────────────────────────┘
//!                     ↓ (read only)
//! ┌─────────────────────────────────────────────┐
//! │ editor: one EditSession per open view       │
//! │  - Seed drafts from the store               │
//! │  - Edit one fragment at a time              │
//! │  - Reset to canonical                       │
//! │  - Snapshot for rendering                   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: drafts → sandboxed document  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Drafts never flow back to the store.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use swatch_editor::EditSession;
//! use swatch_common::{FragmentKind, TemplateId};
//!
//! let mut session = EditSession::open("view-1", &store, TemplateId(1)).await?;
//! session.set_fragment(FragmentKind::Css, ".a { color: blue }");
//! let doc = session.preview();
//!
//! session.reset(&store).await?;
//! ```

mod buffer;
mod errors;
mod session;

pub use buffer::EditBuffer;
pub use errors::EditorError;
pub use session::EditSession;

// Re-export common types for convenience
pub use swatch_common::{FragmentKind, Fragments};
pub use swatch_compiler_html::RenderableDocument;
