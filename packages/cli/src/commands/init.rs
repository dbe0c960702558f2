use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use swatch_common::{Template, TemplateId};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Template catalog file
    #[arg(short, long, default_value = "templates.json")]
    pub catalog: String,

    /// Port for `swatch serve`
    #[arg(short, long, default_value_t = 3030)]
    pub port: u16,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Swatch catalog...".bright_blue().bold());

    let config = Config {
        catalog: args.catalog.clone(),
        port: args.port,
        ..Config::default()
    };

    // Seed a catalog so `serve` has something to preview
    let catalog_path = config.get_catalog_path(cwd);
    if !catalog_path.exists() {
        if let Some(parent) = catalog_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let catalog = serde_json::to_string_pretty(&[example_template()])?;
        fs::write(&catalog_path, catalog)?;
        println!("  {} Created {}", "✓".green(), args.catalog);
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Catalog initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", args.catalog);
    println!("  2. Run: swatch serve");
    println!("  3. Open http://127.0.0.1:{}/api/templates/1/preview", args.port);

    Ok(())
}

fn example_template() -> Template {
    Template {
        id: TemplateId(1),
        title: "Fancy Card".to_string(),
        category: "Cards".to_string(),
        description: "A card with a soft shadow".to_string(),
        code_html: r#"<div class="card">
  <h3>Fancy Card</h3>
  <p>Hover me</p>
</div>"#
            .to_string(),
        code_css: r#".card {
  padding: 16px;
  border-radius: 8px;
  box-shadow: 0 2px 8px rgba(0, 0, 0, 0.15);
  transition: transform 0.2s;
}
.card:hover {
  transform: translateY(-2px);
}"#
        .to_string(),
        code_js: String::new(),
        preview_image: None,
        tags: vec!["card".to_string()],
        created_by: None,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_config_and_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();

        init(
            InitArgs {
                catalog: "data/templates.json".to_string(),
                port: 4000,
                force: false,
            },
            cwd,
        )
        .unwrap();

        let config = Config::load(cwd).unwrap();
        assert_eq!(config.catalog, "data/templates.json");
        assert_eq!(config.port, 4000);

        let catalog = fs::read_to_string(dir.path().join("data/templates.json")).unwrap();
        let templates: Vec<Template> = serde_json::from_str(&catalog).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].title, "Fancy Card");
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "port": 9000 }"#).unwrap();

        init(
            InitArgs {
                catalog: "templates.json".to_string(),
                port: 3030,
                force: false,
            },
            cwd,
        )
        .unwrap();

        assert_eq!(Config::load(cwd).unwrap().port, 9000);
        assert!(!dir.path().join("templates.json").exists());
    }
}
