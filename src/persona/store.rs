//! Persona persistence
//!
//! Personas live as YAML records in a flat directory, one file per agent.
//! Only the compiled persona text is persisted; the structured config is
//! always recovered from the marker embedded in it. Draft configs (the
//! editing surface) sit beside the records as `<name>.config.yaml`.

use chrono::{DateTime, Utc};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::config::AgentConfig;

const DRAFT_SUFFIX: &str = ".config.yaml";

/// What gets persisted for an agent: name, summary, and the compiled
/// persona text carrying its own embedded configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaRecord {
    /// Display name of the agent
    pub agent_name: String,

    /// Generated one-line summary
    pub description: String,

    /// Compiled persona text, marker prefix included
    pub persona: String,

    /// When this record was last written
    pub updated_at: DateTime<Utc>,
}

/// File-backed store for persona records and draft configs
pub struct PersonaStore {
    personas_dir: PathBuf,
}

impl PersonaStore {
    pub fn new(personas_dir: PathBuf) -> Self {
        Self { personas_dir }
    }

    pub fn personas_dir(&self) -> &Path {
        &self.personas_dir
    }

    pub fn record_path(&self, name: &str) -> PathBuf {
        self.personas_dir.join(format!("{}.yaml", name))
    }

    pub fn draft_path(&self, name: &str) -> PathBuf {
        self.personas_dir.join(format!("{}{}", name, DRAFT_SUFFIX))
    }

    /// Persist a record, creating the store directory on first save
    pub fn save(&self, name: &str, record: &PersonaRecord) -> Result<()> {
        fs::create_dir_all(&self.personas_dir)
            .with_context(|| format!("Failed to create personas directory: {}", self.personas_dir.display()))?;

        let path = self.record_path(name);
        let content = serde_yaml::to_string(record).context("Failed to serialize persona record")?;
        fs::write(&path, content).with_context(|| format!("Failed to write persona record: {}", path.display()))?;

        log::info!("Saved persona '{}' to {}", name, path.display());
        Ok(())
    }

    pub fn load(&self, name: &str) -> Result<PersonaRecord> {
        let path = self.record_path(name);
        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read persona record: {}", path.display()))?;

        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse persona record: {}", path.display()))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.record_path(name).exists()
    }

    pub fn remove(&self, name: &str) -> Result<()> {
        let path = self.record_path(name);
        fs::remove_file(&path).with_context(|| format!("Failed to remove persona record: {}", path.display()))?;

        // Drop the draft too if one is lying around
        let draft = self.draft_path(name);
        if draft.exists() {
            fs::remove_file(&draft).with_context(|| format!("Failed to remove draft: {}", draft.display()))?;
        }

        Ok(())
    }

    /// Load all records, sorted by agent name. Unreadable files are
    /// logged and skipped rather than failing the whole listing.
    pub fn list(&self) -> Result<Vec<(String, PersonaRecord)>> {
        let mut records = Vec::new();

        if !self.personas_dir.exists() {
            return Ok(records);
        }

        let entries = fs::read_dir(&self.personas_dir)
            .with_context(|| format!("Failed to read personas directory: {}", self.personas_dir.display()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if file_name.ends_with(DRAFT_SUFFIX) {
                continue;
            }
            if path.extension().map(|e| e == "yaml" || e == "yml").unwrap_or(false) {
                let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or(file_name).to_string();
                match self.load(&name) {
                    Ok(record) => records.push((name, record)),
                    Err(e) => {
                        log::warn!("Skipping unreadable persona record {}: {}", path.display(), e);
                    }
                }
            }
        }

        records.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(records)
    }

    /// Write a draft config for editing
    pub fn save_draft(&self, name: &str, config: &AgentConfig) -> Result<()> {
        fs::create_dir_all(&self.personas_dir)
            .with_context(|| format!("Failed to create personas directory: {}", self.personas_dir.display()))?;

        let path = self.draft_path(name);
        let content = serde_yaml::to_string(config).context("Failed to serialize draft config")?;
        fs::write(&path, content).with_context(|| format!("Failed to write draft config: {}", path.display()))?;

        Ok(())
    }

    pub fn load_draft(&self, name: &str) -> Result<AgentConfig> {
        let path = self.draft_path(name);
        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read draft config: {}", path.display()))?;

        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse draft config: {}", path.display()))
    }

    pub fn draft_exists(&self, name: &str) -> bool {
        self.draft_path(name).exists()
    }

    /// Names of drafts present in the store
    pub fn list_drafts(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        if !self.personas_dir.exists() {
            return Ok(names);
        }

        let entries = fs::read_dir(&self.personas_dir)
            .with_context(|| format!("Failed to read personas directory: {}", self.personas_dir.display()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if let Some(file_name) = path.file_name().and_then(|n| n.to_str())
                && let Some(name) = file_name.strip_suffix(DRAFT_SUFFIX)
            {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::compiler::{compile, generate_description};
    use tempfile::TempDir;

    fn record_for(config: &AgentConfig) -> PersonaRecord {
        PersonaRecord {
            agent_name: config.agent_name.clone(),
            description: generate_description(config),
            persona: compile(config),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = PersonaStore::new(dir.path().join("personas"));

        let config = AgentConfig::default();
        store.save("shop-bot", &record_for(&config)).unwrap();

        let loaded = store.load("shop-bot").unwrap();
        assert_eq!(loaded.agent_name, "AI Assistant");
        assert_eq!(crate::persona::compiler::decompile(&loaded.persona), config);
    }

    #[test]
    fn test_list_skips_drafts_and_sorts() {
        let dir = TempDir::new().unwrap();
        let store = PersonaStore::new(dir.path().to_path_buf());

        let config = AgentConfig::default();
        store.save("zeta", &record_for(&config)).unwrap();
        store.save("alpha", &record_for(&config)).unwrap();
        store.save_draft("pending", &config).unwrap();

        let records = store.list().unwrap();
        let names: Vec<&str> = records.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_list_skips_unreadable_record() {
        let dir = TempDir::new().unwrap();
        let store = PersonaStore::new(dir.path().to_path_buf());

        store.save("good", &record_for(&AgentConfig::default())).unwrap();
        fs::write(dir.path().join("bad.yaml"), ": not : valid : yaml : [").unwrap();

        let records = store.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, "good");
    }

    #[test]
    fn test_list_empty_when_dir_missing() {
        let store = PersonaStore::new(PathBuf::from("/nonexistent/personas"));
        assert!(store.list().unwrap().is_empty());
        assert!(store.list_drafts().unwrap().is_empty());
    }

    #[test]
    fn test_draft_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = PersonaStore::new(dir.path().to_path_buf());

        let mut config = AgentConfig::default();
        config.agent_name = "Drafty".to_string();
        store.save_draft("drafty", &config).unwrap();

        assert!(store.draft_exists("drafty"));
        assert_eq!(store.load_draft("drafty").unwrap(), config);
        assert_eq!(store.list_drafts().unwrap(), vec!["drafty"]);
    }

    #[test]
    fn test_remove_deletes_record_and_draft() {
        let dir = TempDir::new().unwrap();
        let store = PersonaStore::new(dir.path().to_path_buf());

        let config = AgentConfig::default();
        store.save("bot", &record_for(&config)).unwrap();
        store.save_draft("bot", &config).unwrap();

        store.remove("bot").unwrap();
        assert!(!store.exists("bot"));
        assert!(!store.draft_exists("bot"));
    }
}
