//! Initialize perso configuration

use colored::*;
use eyre::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;

pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let perso_dir = path.unwrap_or_else(Config::perso_dir);

    println!("{} perso in {}", "Initializing".bold(), perso_dir.display());
    println!();

    fs::create_dir_all(&perso_dir).with_context(|| format!("Failed to create {}", perso_dir.display()))?;

    let personas_dir = perso_dir.join("personas");
    if !personas_dir.exists() {
        fs::create_dir_all(&personas_dir).context("Failed to create personas directory")?;
        println!("  {} Created personas/", "✓".green());
    } else {
        println!("  {} personas/ already exists", "✓".green());
    }

    let config_path = perso_dir.join("perso.yaml");
    if config_path.exists() && !force {
        println!("  {} perso.yaml already exists (use --force to overwrite)", "⚠".yellow());
    } else {
        let mut config = Config::default();
        config.paths.personas = personas_dir.clone();

        let content = serde_yaml::to_string(&config).context("Failed to serialize default config")?;
        fs::write(&config_path, content).with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!("  {} Wrote perso.yaml", "✓".green());
    }

    println!();
    println!("Next steps:");
    println!("  1. Run {} to draft your first agent", "perso persona new <name>".cyan());
    println!("  2. Run {} to see what agents can do", "perso actions".cyan());

    Ok(())
}
