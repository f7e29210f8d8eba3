//! Action catalog command

use colored::*;
use eyre::Result;

use crate::cli::OutputFormat;
use crate::persona::actions::AVAILABLE_ACTIONS;

pub fn run(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(AVAILABLE_ACTIONS)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(AVAILABLE_ACTIONS)?),
        OutputFormat::Text => {
            println!("{}", "Available Actions:".bold());
            println!();

            for action in AVAILABLE_ACTIONS {
                println!("  {} {} ({})", "•".cyan(), action.label.bold(), action.id);
                println!("    {}", action.description.dimmed());
            }
            println!();
            println!("Reference these ids in a draft's {} list", "allowedActions".cyan());
        }
    }

    Ok(())
}
