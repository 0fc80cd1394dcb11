//! Init command implementation

use std::fs;
use std::path::Path;

use colored::Colorize;

use press_core::CONFIG_FILE;

use crate::error::{CliError, Result};

const STARTER_CONFIG: &str = r#"[site]
base_url = "https://example.com"
username = "editor"
# Prefer the PRESS_APP_PASSWORD environment variable over committing this:
# app_password = "xxxx xxxx xxxx xxxx"

[content]
source = "content.toml"
entity_route = "posts"

[integrity]
tracked = ["content.toml", "press.toml"]
"#;

const STARTER_CONTENT: &str = r#"# Declared content. Each run reconciles the store toward this document.

projects = []

[[records]]
title = "Hello from Content Press"
body = "<p>This record was declared locally and published by the engine.</p>"
status = "draft"
categories = []
tags = []

[records.meta]
"#;

/// Run the init command
pub fn run_init(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        return Err(CliError::user(format!(
            "{} already exists in {}",
            CONFIG_FILE,
            path.display()
        )));
    }
    fs::write(&config_path, STARTER_CONFIG)?;

    let content_path = path.join("content.toml");
    if !content_path.exists() {
        fs::write(&content_path, STARTER_CONTENT)?;
    }

    println!("{} Initialized publishing project.", "OK".green().bold());
    println!();
    println!("Next steps:");
    println!("   1. Edit {} with your store's URL and user.", CONFIG_FILE.cyan());
    println!("   2. Export {}.", "PRESS_APP_PASSWORD".cyan());
    println!("   3. Declare records in {}.", "content.toml".cyan());
    println!("   4. Run {} to preview, {} to publish.", "press check".cyan(), "press sync".cyan());
    Ok(())
}
