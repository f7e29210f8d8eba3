//! Persona compiler
//!
//! Turns an [`AgentConfig`] into the instruction text handed to the chat
//! model, and back. The compiled text starts with the exact source
//! configuration serialized inside an HTML-comment marker, followed by
//! the human-readable rendering. The marker is what makes the transform
//! reversible: decompiling parses it and merges the payload over the
//! defaults. Personas that lost the marker (hand-edited or pre-marker
//! legacy text) degrade to a name-only reconstruction, then to plain
//! defaults.

use lazy_regex::regex_captures;
use log::warn;

use super::actions;
use super::config::{AgentConfig, verbosity_description};

const MARKER_OPEN: &str = "<!--CONFIG:";
const MARKER_CLOSE: &str = "-->";

/// Compile a configuration into persona text.
///
/// Deterministic: equal configs produce byte-identical output.
pub fn compile(config: &AgentConfig) -> String {
    let capabilities = config
        .allowed_actions
        .iter()
        .map(|id| actions::label_for(id))
        .collect::<Vec<_>>()
        .join(", ");

    let mut parts: Vec<String> = vec![
        format!("You are {}, {}.", config.agent_name, config.agent_type.role_description()),
        String::new(),
        "## Personality & Communication Style".to_string(),
        format!("- Tone: Be {}.", config.tone.description()),
        format!("- Verbosity: Keep responses {}.", verbosity_description(config.verbosity)),
        format!("- {}", config.emoji_usage.instruction()),
        format!("- Respond in {}.", config.language.display_name()),
        String::new(),
        "## Business Context".to_string(),
        if config.business_description.is_empty() {
            "No specific business description provided.".to_string()
        } else {
            config.business_description.clone()
        },
        String::new(),
        "## Capabilities".to_string(),
        format!("You can: {}.", capabilities),
        String::new(),
        "## Policies".to_string(),
        config.discount_policy.sentence(config.max_discount_percent),
        String::new(),
        "## Messages".to_string(),
        format!("Greeting: \"{}\"", config.greeting_message),
        format!("Escalation: \"{}\"", config.escalation_message),
    ];

    if !config.custom_instructions.is_empty() {
        parts.push(String::new());
        parts.push("## Additional Instructions".to_string());
        parts.push(config.custom_instructions.clone());
    }

    let body = parts.join("\n");

    match serde_json::to_string(config) {
        Ok(encoded) => format!("{MARKER_OPEN}{encoded}{MARKER_CLOSE}\n{body}"),
        Err(e) => {
            // Cannot happen for a plain struct; ship the body without the
            // marker rather than fail, the persona is still usable.
            warn!("Failed to embed persona config: {}", e);
            body
        }
    }
}

/// Reconstruct the configuration a persona was compiled from.
///
/// Tries, in order: the embedded config marker, the identity line
/// (`You are <name>, ...` recovers the name only), then defaults. An
/// unparseable marker payload is logged and treated as absent.
pub fn decompile(persona: &str) -> AgentConfig {
    if persona.is_empty() {
        return AgentConfig::default();
    }

    if let Some((_, payload)) = regex_captures!(r"<!--CONFIG:(.*?)-->", persona) {
        match serde_json::from_str::<AgentConfig>(payload) {
            Ok(config) => return config,
            Err(e) => warn!("Ignoring unparseable embedded persona config: {}", e),
        }
    }

    if let Some((_, name)) = regex_captures!(r"You are ([^,]+),", persona) {
        return AgentConfig {
            agent_name: name.trim().to_string(),
            ..AgentConfig::default()
        };
    }

    AgentConfig::default()
}

/// Short summary persisted alongside the persona, e.g.
/// `Sales Assistant - friendly tone, EN language`
pub fn generate_description(config: &AgentConfig) -> String {
    format!(
        "{} - {} tone, {} language",
        config.agent_type.label(),
        config.tone,
        config.language.code().to_uppercase()
    )
}
