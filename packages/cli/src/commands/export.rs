use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use swatch_common::{AccessContext, JsonCatalogStore, Role, SubscriptionStatus, TemplateId};
use swatch_export::{ExportError, ExportGate};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Template id from the catalog
    pub id: u64,

    /// Caller role (user, admin)
    #[arg(long, default_value = "user")]
    pub role: String,

    /// Caller subscription status
    #[arg(long)]
    pub subscription: Option<String>,

    /// Directory to write the exported file into
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = Arc::new(JsonCatalogStore::new(config.get_catalog_path(cwd)));
    let gate = ExportGate::new(store);

    let ctx = AccessContext::new(
        Role::from_wire(&args.role),
        args.subscription.as_deref().map(SubscriptionStatus::from_wire),
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let artifact = match runtime.block_on(gate.request_export(TemplateId(args.id), &ctx)) {
        Ok(artifact) => artifact,
        Err(ExportError::Denied(reason)) => {
            return Err(anyhow!("Export denied ({}): {}", reason.code(), reason));
        }
        Err(e) => return Err(e.into()),
    };

    let out_dir = PathBuf::from(cwd).join(&args.out_dir);
    fs::create_dir_all(&out_dir)?;
    let out = out_dir.join(local_file_name(artifact.filename()));
    fs::write(&out, artifact.content())?;

    println!("  {} Exported {}", "✓".green(), out.display());
    Ok(())
}

/// Flatten an export file name into a single path component inside the
/// output directory. Titles come from the catalog and may hold separators.
fn local_file_name(filename: &str) -> String {
    let flattened: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { '-' } else { c })
        .collect();

    let name = flattened.trim_start_matches('.');
    if name.is_empty() || name == "html" {
        "template.html".to_string()
    } else {
        name.to_string()
    }
}
