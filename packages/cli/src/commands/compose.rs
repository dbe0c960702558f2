use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use swatch_common::{Fragments, JsonCatalogStore, TemplateId, TemplateStore};
use swatch_compiler_html::{compose as compose_document, compose_standalone, RenderableDocument};

#[derive(Debug, Args)]
pub struct ComposeArgs {
    /// Template id from the catalog. Without it fragments are read from files.
    pub id: Option<u64>,

    /// Markup fragment file
    #[arg(long, conflicts_with = "id")]
    pub html: Option<PathBuf>,

    /// Style fragment file
    #[arg(long, conflicts_with = "id")]
    pub css: Option<PathBuf>,

    /// Script fragment file
    #[arg(long, conflicts_with = "id")]
    pub js: Option<PathBuf>,

    /// Emit a standalone document with a title and meta tags. This is an
    /// operator tool over a local catalog and does not go through the
    /// export entitlement check.
    #[arg(long)]
    pub standalone: bool,

    /// Title for standalone documents built from files
    #[arg(long, default_value = "")]
    pub title: String,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn compose(args: ComposeArgs, cwd: &str) -> Result<()> {
    let (title, fragments) = match args.id {
        Some(id) => {
            let config = Config::load(cwd)?;
            let store = JsonCatalogStore::new(config.get_catalog_path(cwd));
            let runtime = tokio::runtime::Runtime::new()?;
            let template = runtime.block_on(store.get_template(TemplateId(id)))?;
            (template.title.clone(), template.fragments())
        }
        None => {
            let cwd = Path::new(cwd);
            let fragments = Fragments::new(
                read_fragment(cwd, args.html.as_deref())?,
                read_fragment(cwd, args.css.as_deref())?,
                read_fragment(cwd, args.js.as_deref())?,
            );
            (args.title.clone(), fragments)
        }
    };

    let document = render(&title, &fragments, args.standalone);

    match args.out {
        Some(out) => {
            let out = Path::new(cwd).join(out);
            fs::write(&out, document.as_str())?;
            eprintln!("  {} {}", "✓".green(), out.display());
        }
        None => print!("{}", document),
    }

    Ok(())
}

fn render(title: &str, fragments: &Fragments, standalone: bool) -> RenderableDocument {
    if standalone {
        compose_standalone(title, fragments)
    } else {
        compose_document(fragments)
    }
}

// A fragment that was not given is empty
fn read_fragment(cwd: &Path, path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            let path = cwd.join(path);
            fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))
        }
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_from_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("card.html"), "<div>A</div>").unwrap();
        fs::write(dir.path().join("card.css"), ".a{color:red}").unwrap();

        compose(
            ComposeArgs {
                id: None,
                html: Some("card.html".into()),
                css: Some("card.css".into()),
                js: None,
                standalone: false,
                title: String::new(),
                out: Some("out.html".into()),
            },
            dir.path().to_str().unwrap(),
        )
        .unwrap();

        let output = fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert_eq!(
            output,
            "<!DOCTYPE html>\n<html>\n  <head>\n    <style>.a{color:red}</style>\n  </head>\n  <body>\n<div>A</div>\n    <script></script>\n  </body>\n</html>\n"
        );
    }

    #[test]
    fn test_missing_fragment_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_fragment(dir.path(), Some(Path::new("nope.css")));
        assert!(result.is_err());
    }

    #[test]
    fn test_standalone_render_uses_title() {
        let fragments = Fragments::new("<p/>", "", "");
        let document = render("Fancy Card", &fragments, true);
        assert!(document.as_str().contains("<title>Fancy Card</title>"));
    }
}
