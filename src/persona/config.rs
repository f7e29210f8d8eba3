//! Structured agent configuration
//!
//! The editable form of a storefront agent: identity, communication
//! style, capabilities, and policies. Each enum carries the fixed prompt
//! text it contributes to the compiled persona.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// What kind of storefront agent this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    Sales,
    Support,
    General,
}

impl AgentType {
    /// Role description used in the persona identity line
    pub fn role_description(&self) -> &'static str {
        match self {
            AgentType::Sales => {
                "a sales assistant focused on helping customers find products and complete purchases"
            }
            AgentType::Support => {
                "a customer support specialist helping with inquiries, issues, and after-sales service"
            }
            AgentType::General => "a versatile assistant handling both sales and support tasks",
        }
    }

    /// Short label used in the generated description field
    pub fn label(&self) -> &'static str {
        match self {
            AgentType::Sales => "Sales Assistant",
            AgentType::Support => "Support Agent",
            AgentType::General => "General Assistant",
        }
    }
}

/// Communication tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Friendly,
    Professional,
    Casual,
}

impl Tone {
    /// Prompt fragment describing the tone
    pub fn description(&self) -> &'static str {
        match self {
            Tone::Friendly => "warm, approachable, and conversational",
            Tone::Professional => "formal, courteous, and business-like",
            Tone::Casual => "relaxed, informal, and friendly",
        }
    }
}

/// How freely the agent may use emojis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiUsage {
    None,
    Low,
    Medium,
}

impl EmojiUsage {
    /// Full instruction sentence for the personality block
    pub fn instruction(&self) -> &'static str {
        match self {
            EmojiUsage::None => "Do not use any emojis.",
            EmojiUsage::Low => "Occasionally use emojis sparingly for emphasis.",
            EmojiUsage::Medium => "Use emojis moderately to add warmth to responses.",
        }
    }
}

/// Response language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Si,
    Ta,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Si => "si",
            Language::Ta => "ta",
        }
    }

    /// Display name used in the persona text
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Si => "Sinhala",
            Language::Ta => "Tamil",
        }
    }
}

/// Whether and how the agent may grant discounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountPolicy {
    Never,
    Allowed,
    Approval,
}

impl DiscountPolicy {
    /// Policy sentence for the persona text. The percent only appears
    /// when the policy permits discounts at all.
    pub fn sentence(&self, max_percent: u8) -> String {
        match self {
            DiscountPolicy::Never => "You are NOT allowed to offer or apply any discounts.".to_string(),
            DiscountPolicy::Allowed => {
                format!("You may offer discounts up to {}% when appropriate.", max_percent)
            }
            DiscountPolicy::Approval => {
                format!(
                    "You may suggest discounts up to {}%, but must note they require manager approval.",
                    max_percent
                )
            }
        }
    }
}

/// Verbosity fragment for the personality block. Levels run 1 (terse) to
/// 5 (exhaustive); anything outside that range reads as the balanced
/// middle setting. Range validation is the caller's job.
pub fn verbosity_description(level: u8) -> &'static str {
    match level {
        1 => "extremely concise, using minimal words",
        2 => "brief but informative",
        4 => "thorough and explanatory",
        5 => "very detailed with comprehensive explanations",
        _ => "balanced between concise and detailed",
    }
}

/// The structured, editable form of a storefront agent.
///
/// Serialized with camelCase keys so the embedded encoding inside
/// compiled personas stays compatible with records persisted by earlier
/// releases. Any field missing from a parsed payload falls back to its
/// documented default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentConfig {
    /// Display name the agent introduces itself with
    pub agent_name: String,

    pub agent_type: AgentType,

    pub tone: Tone,

    /// 1 (terse) to 5 (exhaustive)
    pub verbosity: u8,

    pub emoji_usage: EmojiUsage,

    pub language: Language,

    /// Free text describing the merchant's business; a fixed placeholder
    /// is rendered when empty
    pub business_description: String,

    /// Action ids the agent may perform. Insertion order is kept for
    /// rendering; equality is set equality.
    pub allowed_actions: IndexSet<String>,

    pub discount_policy: DiscountPolicy,

    /// Cap for discount offers; ignored when the policy is `never`
    pub max_discount_percent: u8,

    pub greeting_message: String,

    pub escalation_message: String,

    /// Extra merchant-provided instructions; empty means none
    pub custom_instructions: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_name: "AI Assistant".to_string(),
            agent_type: AgentType::Sales,
            tone: Tone::Friendly,
            verbosity: 3,
            emoji_usage: EmojiUsage::Low,
            language: Language::En,
            business_description: String::new(),
            allowed_actions: ["view_products", "create_order", "answer_questions"]
                .into_iter()
                .map(String::from)
                .collect(),
            discount_policy: DiscountPolicy::Never,
            max_discount_percent: 0,
            greeting_message: "Hello! How can I help you today?".to_string(),
            escalation_message: "I'll connect you with a human agent who can better assist you.".to_string(),
            custom_instructions: String::new(),
        }
    }
}

impl std::fmt::Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

impl std::fmt::Display for EmojiUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::fmt::Display for DiscountPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.agent_name, "AI Assistant");
        assert_eq!(config.agent_type, AgentType::Sales);
        assert_eq!(config.tone, Tone::Friendly);
        assert_eq!(config.verbosity, 3);
        assert_eq!(config.discount_policy, DiscountPolicy::Never);
        assert_eq!(config.max_discount_percent, 0);
        assert!(config.allowed_actions.contains("view_products"));
        assert!(config.allowed_actions.contains("create_order"));
        assert!(config.allowed_actions.contains("answer_questions"));
        assert!(config.custom_instructions.is_empty());
    }

    #[test]
    fn test_enum_serde_lowercase() {
        assert_eq!(serde_json::to_string(&AgentType::Support).unwrap(), "\"support\"");
        assert_eq!(serde_json::to_string(&Tone::Professional).unwrap(), "\"professional\"");
        assert_eq!(serde_json::to_string(&EmojiUsage::None).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&Language::Si).unwrap(), "\"si\"");
        assert_eq!(serde_json::to_string(&DiscountPolicy::Approval).unwrap(), "\"approval\"");

        let tone: Tone = serde_json::from_str("\"casual\"").unwrap();
        assert_eq!(tone, Tone::Casual);
    }

    #[test]
    fn test_config_camel_case_keys() {
        let json = serde_json::to_string(&AgentConfig::default()).unwrap();
        assert!(json.contains("\"agentName\""));
        assert!(json.contains("\"allowedActions\""));
        assert!(json.contains("\"maxDiscountPercent\""));
        assert!(!json.contains("\"agent_name\""));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: AgentConfig = serde_json::from_str(r#"{"agentName":"Zara","tone":"casual"}"#).unwrap();
        assert_eq!(config.agent_name, "Zara");
        assert_eq!(config.tone, Tone::Casual);
        assert_eq!(config.agent_type, AgentType::Sales);
        assert_eq!(config.verbosity, 3);
        assert_eq!(config.greeting_message, "Hello! How can I help you today?");
    }

    #[test]
    fn test_verbosity_description_total() {
        assert_eq!(verbosity_description(1), "extremely concise, using minimal words");
        assert_eq!(verbosity_description(5), "very detailed with comprehensive explanations");
        assert_eq!(verbosity_description(3), "balanced between concise and detailed");
        assert_eq!(verbosity_description(0), verbosity_description(3));
        assert_eq!(verbosity_description(9), verbosity_description(3));
    }

    #[test]
    fn test_allowed_actions_set_equality() {
        let mut a = AgentConfig::default();
        let mut b = AgentConfig::default();
        a.allowed_actions = ["view_products", "create_order"].into_iter().map(String::from).collect();
        b.allowed_actions = ["create_order", "view_products"].into_iter().map(String::from).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_discount_sentence() {
        assert!(!DiscountPolicy::Never.sentence(50).contains("50"));
        assert_eq!(
            DiscountPolicy::Allowed.sentence(15),
            "You may offer discounts up to 15% when appropriate."
        );
        assert!(DiscountPolicy::Approval.sentence(20).contains("manager approval"));
    }

    #[test]
    fn test_display() {
        assert_eq!(AgentType::Support.to_string(), "support");
        assert_eq!(Language::Ta.to_string(), "ta");
        assert_eq!(Language::Ta.display_name(), "Tamil");
        assert_eq!(DiscountPolicy::Never.to_string(), "never");
    }
}
