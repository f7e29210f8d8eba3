//! Persona management commands

use chrono::Utc;
use colored::*;
use eyre::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::cli::{OutputFormat, PersonaAction};
use crate::config::Config;
use crate::persona::actions;
use crate::persona::compiler::{compile, decompile, generate_description};
use crate::persona::config::{AgentConfig, DiscountPolicy};
use crate::persona::store::{PersonaRecord, PersonaStore};

pub fn run(action: PersonaAction, config: &Config) -> Result<()> {
    let store = PersonaStore::new(config.personas_dir());

    match action {
        PersonaAction::List { format } => list_personas(OutputFormat::resolve(format), &store),
        PersonaAction::New { name, force } => new_draft(&name, force, &store),
        PersonaAction::Compile { name, dry_run } => compile_draft(&name, dry_run, &store),
        PersonaAction::Show { name, format } => show_persona(&name, OutputFormat::resolve(format), &store),
        PersonaAction::Prompt { name } => show_prompt(&name, &store),
        PersonaAction::Describe { name } => describe_persona(&name, &store),
        PersonaAction::Decompile { file, format } => decompile_file(&file, OutputFormat::resolve(format)),
        PersonaAction::Remove { name, force } => remove_persona(&name, force, &store),
    }
}

fn list_personas(format: OutputFormat, store: &PersonaStore) -> Result<()> {
    let records = store.list()?;
    let drafts = store.list_drafts()?;

    #[derive(Serialize)]
    struct PersonaSummary {
        name: String,
        agent_name: String,
        description: String,
        updated_at: String,
    }

    let summaries: Vec<PersonaSummary> = records
        .iter()
        .map(|(name, r)| PersonaSummary {
            name: name.clone(),
            agent_name: r.agent_name.clone(),
            description: r.description.clone(),
            updated_at: r.updated_at.to_rfc3339(),
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&summaries)?),
        OutputFormat::Text => {
            println!("{}", "Stored Personas:".bold());
            println!();

            if records.is_empty() {
                println!("  {} No personas found in {}", "(none)".dimmed(), store.personas_dir().display());
                println!();
                println!("  Create one with: {}", "perso persona new <name>".cyan());
            } else {
                for (name, record) in &records {
                    println!("  {} {}", "●".green(), name.bold());
                    println!("    {} ({})", record.agent_name, record.description.dimmed());
                    println!("    Updated: {}", record.updated_at.format("%Y-%m-%d %H:%M UTC").to_string().dimmed());
                    println!();
                }
            }

            let pending: Vec<&String> = drafts.iter().filter(|n| !store.exists(n)).collect();
            if !pending.is_empty() {
                println!("{}", "Uncompiled Drafts:".bold());
                println!();
                for name in pending {
                    println!("  {} {} ({})", "○".yellow(), name, "perso persona compile".cyan());
                }
            }
        }
    }

    Ok(())
}

fn new_draft(name: &str, force: bool, store: &PersonaStore) -> Result<()> {
    let draft_path = store.draft_path(name);

    if draft_path.exists() && !force {
        eprintln!(
            "{} Draft '{}' already exists at {} (use --force to overwrite)",
            "✗".red(),
            name,
            draft_path.display()
        );
        return Ok(());
    }

    fs::create_dir_all(store.personas_dir())
        .with_context(|| format!("Failed to create personas directory: {}", store.personas_dir().display()))?;

    let template = draft_template(name);
    fs::write(&draft_path, template).with_context(|| format!("Failed to write draft: {}", draft_path.display()))?;

    println!("{} Created draft config: {}", "✓".green(), draft_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize the agent", draft_path.display());
    println!("  2. Run {} to build and store the persona", format!("perso persona compile {}", name).cyan());

    Ok(())
}

fn compile_draft(name: &str, dry_run: bool, store: &PersonaStore) -> Result<()> {
    if !store.draft_exists(name) {
        eprintln!(
            "{} No draft '{}' found at {} (create one with {})",
            "✗".red(),
            name,
            store.draft_path(name).display(),
            format!("perso persona new {}", name).cyan()
        );
        return Ok(());
    }

    let agent_config = store.load_draft(name)?;
    let persona = compile(&agent_config);
    let description = generate_description(&agent_config);

    if dry_run {
        println!("{}", persona);
        return Ok(());
    }

    let record = PersonaRecord {
        agent_name: agent_config.agent_name.clone(),
        description: description.clone(),
        persona,
        updated_at: Utc::now(),
    };
    store.save(name, &record)?;

    println!("{} Compiled persona '{}' ({})", "✓".green(), name.bold(), description.dimmed());
    println!("  {}", store.record_path(name).display());

    Ok(())
}

fn show_persona(name: &str, format: OutputFormat, store: &PersonaStore) -> Result<()> {
    if !store.exists(name) {
        eprintln!("{} Persona '{}' not found at {}", "✗".red(), name, store.record_path(name).display());
        return Ok(());
    }

    let record = store.load(name)?;
    let agent_config = decompile(&record.persona);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&agent_config)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&agent_config)?),
        OutputFormat::Text => print_config(&agent_config),
    }

    Ok(())
}

fn print_config(agent_config: &AgentConfig) {
    println!("{} {}", "Agent:".bold(), agent_config.agent_name.green().bold());
    println!();
    println!("{} {} ({})", "Type:".bold(), agent_config.agent_type, agent_config.agent_type.label());
    println!("{} {}", "Tone:".bold(), agent_config.tone);
    println!("{} {}", "Verbosity:".bold(), agent_config.verbosity);
    println!("{} {}", "Emoji usage:".bold(), agent_config.emoji_usage);
    println!(
        "{} {} ({})",
        "Language:".bold(),
        agent_config.language.display_name(),
        agent_config.language
    );

    if !agent_config.business_description.is_empty() {
        println!();
        println!("{}", "Business:".bold());
        for line in agent_config.business_description.lines() {
            println!("  {}", line);
        }
    }

    println!();
    println!("{}", "Allowed actions:".bold());
    for id in &agent_config.allowed_actions {
        match actions::find(id) {
            Some(spec) => println!("  {} {} - {}", "•".cyan(), spec.label.bold(), spec.description.dimmed()),
            None => println!("  {} {} {}", "•".cyan(), id.bold(), "(not in catalog)".yellow()),
        }
    }

    println!();
    match agent_config.discount_policy {
        DiscountPolicy::Never => println!("{} never", "Discounts:".bold()),
        policy => println!(
            "{} {} (up to {}%)",
            "Discounts:".bold(),
            policy,
            agent_config.max_discount_percent
        ),
    }

    println!();
    println!("{}", "Messages:".bold());
    println!("  Greeting: {}", agent_config.greeting_message.italic());
    println!("  Escalation: {}", agent_config.escalation_message.italic());

    if !agent_config.custom_instructions.is_empty() {
        println!();
        println!("{}", "Custom instructions:".bold());
        for line in agent_config.custom_instructions.lines() {
            println!("  {}", line);
        }
    }
}

fn show_prompt(name: &str, store: &PersonaStore) -> Result<()> {
    if !store.exists(name) {
        eprintln!("{} Persona '{}' not found", "✗".red(), name);
        return Ok(());
    }

    let record = store.load(name)?;
    println!("{}", record.persona);

    Ok(())
}

fn describe_persona(name: &str, store: &PersonaStore) -> Result<()> {
    if !store.exists(name) {
        eprintln!("{} Persona '{}' not found", "✗".red(), name);
        return Ok(());
    }

    let record = store.load(name)?;
    println!("{}", record.description);

    Ok(())
}

fn decompile_file(file: &PathBuf, format: OutputFormat) -> Result<()> {
    let persona =
        fs::read_to_string(file).with_context(|| format!("Failed to read persona file: {}", file.display()))?;

    let agent_config = decompile(&persona);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&agent_config)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&agent_config)?),
        OutputFormat::Text => print_config(&agent_config),
    }

    Ok(())
}

fn remove_persona(name: &str, force: bool, store: &PersonaStore) -> Result<()> {
    if !store.exists(name) {
        eprintln!("{} Persona '{}' not found", "✗".red(), name);
        return Ok(());
    }

    if !force {
        print!("Remove persona '{}'? [y/N] ", name);
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Aborted");
            return Ok(());
        }
    }

    store.remove(name)?;
    println!("{} Removed persona '{}'", "✓".green(), name);

    Ok(())
}

/// Commented draft template; field values are the documented defaults
fn draft_template(name: &str) -> String {
    format!(
        r#"# Agent draft: {name}
# Created by: perso persona new {name}
# Compile with: perso persona compile {name}

# Display name the agent introduces itself with
agentName: {name}

# sales | support | general
agentType: sales

# friendly | professional | casual
tone: friendly

# 1 (terse) to 5 (exhaustive)
verbosity: 3

# none | low | medium
emojiUsage: low

# en | si | ta
language: en

# What the business sells; shown to the agent as context
businessDescription: ""

# Action ids the agent may perform
# Run 'perso actions' to see the catalog
allowedActions:
  - view_products
  - create_order
  - answer_questions

# never | allowed | approval
discountPolicy: never

# 0-100, ignored when discountPolicy is never
maxDiscountPercent: 0

greetingMessage: "Hello! How can I help you today?"
escalationMessage: "I'll connect you with a human agent who can better assist you."

# Extra instructions appended to the persona when non-empty
customInstructions: ""
"#,
        name = name
    )
}
