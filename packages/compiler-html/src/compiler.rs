use serde::Serialize;
use std::fmt;
use swatch_common::Fragments;

/// Title used by standalone documents whose template has none
pub const DEFAULT_TITLE: &str = "Template";

/// A fully composed document, ready to hand to a sandboxed host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RenderableDocument {
    pub markup: String,
}

impl RenderableDocument {
    pub fn as_str(&self) -> &str {
        &self.markup
    }

    pub fn into_string(self) -> String {
        self.markup
    }

    pub fn len(&self) -> usize {
        self.markup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }
}

impl fmt::Display for RenderableDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

/// Options for the document skeleton. Fragments are never affected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Pretty print the skeleton
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// `lang` attribute on the root element
    pub lang: Option<String>,
    /// Document title (escaped when written)
    pub title: Option<String>,
    /// Emit charset and viewport meta tags
    pub standalone_meta: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            lang: None,
            title: None,
            standalone_meta: false,
        }
    }
}

impl ComposeOptions {
    /// Skeleton for a downloadable, self-contained file
    pub fn standalone(title: &str) -> Self {
        let title = if title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            title
        };

        Self {
            lang: Some("en".to_string()),
            title: Some(title.to_string()),
            standalone_meta: true,
            ..Default::default()
        }
    }
}

struct Context<'a> {
    options: &'a ComposeOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a ComposeOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.end_line();
    }

    /// Write `open`, the fragment verbatim, then `close` on one line
    fn add_block(&mut self, open: &str, fragment: &str, close: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(open);
        self.add(fragment);
        self.add(close);
        self.end_line();
    }

    /// Write a fragment verbatim with no indentation
    fn add_raw_line(&mut self, fragment: &str) {
        self.add(fragment);
        self.end_line();
    }

    fn end_line(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compose a preview document from three fragments.
///
/// The output is a pure function of the input: a style block holding
/// exactly `css`, a body holding exactly `html`, then a script block holding
/// exactly `js`. Nothing is escaped or sanitized. Isolation is the host's
/// job, see [`crate::SandboxPolicy`].
pub fn compose(fragments: &Fragments) -> RenderableDocument {
    compose_with_options(fragments, &ComposeOptions::default())
}

/// Compose a self-contained document for export
pub fn compose_standalone(title: &str, fragments: &Fragments) -> RenderableDocument {
    compose_with_options(fragments, &ComposeOptions::standalone(title))
}

pub fn compose_with_options(fragments: &Fragments, options: &ComposeOptions) -> RenderableDocument {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    match &options.lang {
        Some(lang) => ctx.add_line(&format!("<html lang=\"{}\">", escape_html(lang))),
        None => ctx.add_line("<html>"),
    }
    ctx.indent();

    compose_head(&fragments.css, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_raw_line(&fragments.html);
    ctx.add_block("<script>", &fragments.js, "</script>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    RenderableDocument {
        markup: ctx.get_output(),
    }
}

fn compose_head(css: &str, ctx: &mut Context) {
    let options = ctx.options;

    ctx.add_line("<head>");
    ctx.indent();

    if options.standalone_meta {
        ctx.add_line("<meta charset=\"UTF-8\">");
        ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    }

    if let Some(title) = &options.title {
        ctx.add_line(&format!("<title>{}</title>", escape_html(title)));
    }

    ctx.add_block("<style>", css, "</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
