use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::sync::Arc;
use swatch_common::JsonCatalogStore;
use swatch_workspace::{router, AppState, ServerOptions};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Host to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Template catalog file (overrides config)
    #[arg(short, long)]
    pub catalog: Option<String>,

    /// Trust access headers from a fronting auth proxy
    #[arg(long)]
    pub trust_proxy_headers: bool,
}

pub fn serve(args: ServeArgs, cwd: &str) -> Result<()> {
    let mut config = Config::load(cwd)?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(catalog) = args.catalog {
        config.catalog = catalog;
    }
    config.trust_proxy_headers |= args.trust_proxy_headers;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    let catalog_path = config.get_catalog_path(cwd);
    if !catalog_path.exists() {
        return Err(anyhow!(
            "Catalog does not exist: {} (run `swatch init`)",
            catalog_path.display()
        ));
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let addr = runtime.block_on(config.socket_addr())?;

    println!("{}", "🚀 Starting Swatch server...".bright_blue().bold());
    println!("   Catalog: {}", catalog_path.display());
    println!("   Listen:  http://{}", addr);
    if config.trust_proxy_headers {
        println!(
            "   {} trusting x-swatch-* access headers from the proxy",
            "⚠️".yellow()
        );
    }
    println!();

    let store = Arc::new(JsonCatalogStore::new(catalog_path));
    let options = ServerOptions {
        trust_proxy_headers: config.trust_proxy_headers,
    };
    let app = router(AppState::new(store), &options);

    runtime.block_on(swatch_workspace::serve(addr, app))?;

    Ok(())
}
