//! # Swatch HTML Composer
//!
//! Turns three code fragments into one renderable document, and describes
//! how hosts must embed the result.
//!
//! ```rust,ignore
//! use swatch_common::Fragments;
//! use swatch_compiler_html::{compose, PreviewFrame};
//!
//! let doc = compose(&Fragments::new("<div>A</div>", ".a{color:red}", ""));
//! let iframe = PreviewFrame::live(doc, "Live Preview").to_iframe_html();
//! ```

mod compiler;
mod sandbox;

#[cfg(test)]
mod tests;

pub use compiler::{
    compose, compose_standalone, compose_with_options, ComposeOptions, RenderableDocument,
    DEFAULT_TITLE,
};
pub use sandbox::{FrameMode, PreviewFrame, SandboxPolicy};
