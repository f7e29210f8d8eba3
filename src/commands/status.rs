//! System status command

use colored::*;
use eyre::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::persona::store::PersonaStore;

#[derive(Serialize)]
struct Status {
    version: String,
    perso_dir: String,
    personas_dir: String,
    log_level: String,
    personas: Vec<PersonaStatus>,
    drafts: Vec<String>,
}

#[derive(Serialize)]
struct PersonaStatus {
    name: String,
    agent_name: String,
    description: String,
}

pub fn run(format: OutputFormat, config: &Config) -> Result<()> {
    let store = PersonaStore::new(config.personas_dir());
    let records = store.list()?;
    let drafts = store.list_drafts()?;

    let status = Status {
        version: env!("GIT_DESCRIBE").to_string(),
        perso_dir: Config::perso_dir().display().to_string(),
        personas_dir: store.personas_dir().display().to_string(),
        log_level: config.log_level.as_filter().to_string(),
        personas: records
            .iter()
            .map(|(name, r)| PersonaStatus {
                name: name.clone(),
                agent_name: r.agent_name.clone(),
                description: r.description.clone(),
            })
            .collect(),
        drafts,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&status)?),
        OutputFormat::Text => {
            println!("{} {}", "perso".bold(), status.version);
            println!();
            println!("{} {}", "Perso dir:".bold(), status.perso_dir);
            println!("{} {}", "Personas dir:".bold(), status.personas_dir);
            println!("{} {}", "Log level:".bold(), status.log_level);
            println!();

            println!("{} {}", "Personas:".bold(), status.personas.len());
            for p in &status.personas {
                println!("  {} {} - {}", "●".green(), p.name.bold(), p.description.dimmed());
            }

            if !status.drafts.is_empty() {
                println!();
                println!("{} {}", "Drafts:".bold(), status.drafts.len());
                for name in &status.drafts {
                    println!("  {} {}", "○".yellow(), name);
                }
            }
        }
    }

    Ok(())
}
