use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "perso",
    about = "Storefront AI agent personas - draft, compile, and manage",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/perso/logs/perso.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to perso.yaml config file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize perso configuration
    Init {
        /// Directory to initialize (defaults to ~/.config/perso)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Manage agent personas
    Persona {
        #[command(subcommand)]
        action: PersonaAction,
    },

    /// List the agent action catalog
    Actions {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show system status
    Status {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum PersonaAction {
    /// List stored personas
    List {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Create a draft config from template
    New {
        /// Agent name (also the file name)
        name: String,

        /// Overwrite an existing draft
        #[arg(long)]
        force: bool,
    },

    /// Compile a draft config into a stored persona
    Compile {
        /// Agent name
        name: String,

        /// Print the persona instead of saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the structured config recovered from a stored persona
    Show {
        /// Agent name
        name: String,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the stored persona text verbatim
    Prompt {
        /// Agent name
        name: String,
    },

    /// Print the generated one-line description
    Describe {
        /// Agent name
        name: String,
    },

    /// Recover a config from any persona text file
    Decompile {
        /// Path to a persona text file
        file: PathBuf,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Remove a stored persona (and its draft)
    Remove {
        /// Agent name
        name: String,

        /// Remove without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}
