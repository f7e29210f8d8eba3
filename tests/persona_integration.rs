//! Integration tests for the persona workflow
//!
//! These tests drive the compiled binary end to end:
//! - Initializing the perso directory
//! - Drafting, compiling, and inspecting personas
//! - Decompiling legacy persona text
//! - Listing and removing personas

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Helper to get the perso binary path
fn perso_binary() -> PathBuf {
    // When running tests, the binary is in target/debug/perso
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps
    path.push("perso");
    path
}

/// Helper to run perso with an isolated perso directory
fn run_perso(perso_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(perso_binary())
        .env("PERSO_DIR", perso_dir)
        .args(args)
        .output()
        .expect("Failed to execute perso")
}

/// Helper to run perso and get stdout as string
fn run_perso_stdout(perso_dir: &Path, args: &[&str]) -> String {
    let output = run_perso(perso_dir, args);
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_init_creates_layout() {
    let dir = TempDir::new().unwrap();
    let perso_dir = dir.path();

    let output = run_perso(perso_dir, &["init"]);
    assert!(output.status.success());

    assert!(perso_dir.join("personas").is_dir());
    assert!(perso_dir.join("perso.yaml").is_file());
}

#[test]
fn test_new_then_compile_then_show() {
    let dir = TempDir::new().unwrap();
    let perso_dir = dir.path();

    let output = run_perso(perso_dir, &["persona", "new", "shop-bot"]);
    assert!(output.status.success());
    assert!(perso_dir.join("personas").join("shop-bot.config.yaml").is_file());

    let output = run_perso(perso_dir, &["persona", "compile", "shop-bot"]);
    assert!(output.status.success());
    assert!(perso_dir.join("personas").join("shop-bot.yaml").is_file());

    let stdout = run_perso_stdout(perso_dir, &["persona", "show", "shop-bot", "-o", "json"]);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["agentName"], "shop-bot");
    assert_eq!(config["agentType"], "sales");
    assert_eq!(config["verbosity"], 3);
}

#[test]
fn test_compile_dry_run_prints_without_saving() {
    let dir = TempDir::new().unwrap();
    let perso_dir = dir.path();

    run_perso(perso_dir, &["persona", "new", "preview"]);
    let stdout = run_perso_stdout(perso_dir, &["persona", "compile", "preview", "--dry-run"]);

    assert!(stdout.starts_with("<!--CONFIG:"));
    assert!(stdout.contains("You are preview, a sales assistant"));
    assert!(!perso_dir.join("personas").join("preview.yaml").exists());
}

#[test]
fn test_prompt_outputs_persona_text() {
    let dir = TempDir::new().unwrap();
    let perso_dir = dir.path();

    run_perso(perso_dir, &["persona", "new", "greeter"]);
    run_perso(perso_dir, &["persona", "compile", "greeter"]);

    let stdout = run_perso_stdout(perso_dir, &["persona", "prompt", "greeter"]);
    assert!(stdout.starts_with("<!--CONFIG:"));
    assert!(stdout.contains("## Personality & Communication Style"));
    assert!(stdout.contains("## Capabilities"));
    assert!(stdout.contains("Greeting: \"Hello! How can I help you today?\""));
}

#[test]
fn test_describe_outputs_summary() {
    let dir = TempDir::new().unwrap();
    let perso_dir = dir.path();

    run_perso(perso_dir, &["persona", "new", "seller"]);
    run_perso(perso_dir, &["persona", "compile", "seller"]);

    let stdout = run_perso_stdout(perso_dir, &["persona", "describe", "seller"]);
    assert_eq!(stdout.trim(), "Sales Assistant - friendly tone, EN language");
}

#[test]
fn test_edited_draft_roundtrips_through_persona() {
    let dir = TempDir::new().unwrap();
    let perso_dir = dir.path();

    run_perso(perso_dir, &["persona", "new", "support-bot"]);

    // Merchant edits the draft
    let draft_path = perso_dir.join("personas").join("support-bot.config.yaml");
    let draft = fs::read_to_string(&draft_path).unwrap();
    let edited = draft
        .replace("agentType: sales", "agentType: support")
        .replace("tone: friendly", "tone: professional")
        .replace("discountPolicy: never", "discountPolicy: allowed")
        .replace("maxDiscountPercent: 0", "maxDiscountPercent: 15");
    fs::write(&draft_path, edited).unwrap();

    run_perso(perso_dir, &["persona", "compile", "support-bot"]);

    let prompt = run_perso_stdout(perso_dir, &["persona", "prompt", "support-bot"]);
    assert!(prompt.contains("a customer support specialist"));
    assert!(prompt.contains("You may offer discounts up to 15% when appropriate."));

    let stdout = run_perso_stdout(perso_dir, &["persona", "show", "support-bot", "-o", "json"]);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["agentType"], "support");
    assert_eq!(config["tone"], "professional");
    assert_eq!(config["maxDiscountPercent"], 15);
}

#[test]
fn test_decompile_legacy_text_recovers_name() {
    let dir = TempDir::new().unwrap();
    let perso_dir = dir.path();

    let legacy = dir.path().join("legacy.txt");
    fs::write(&legacy, "You are Zara, a sales assistant for a shoe store.\nBe nice.").unwrap();

    let stdout = run_perso_stdout(perso_dir, &["persona", "decompile", legacy.to_str().unwrap(), "-o", "json"]);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["agentName"], "Zara");
    // Everything else falls back to defaults
    assert_eq!(config["agentType"], "sales");
    assert_eq!(config["greetingMessage"], "Hello! How can I help you today?");
}

#[test]
fn test_actions_catalog_json() {
    let dir = TempDir::new().unwrap();

    let stdout = run_perso_stdout(dir.path(), &["actions", "-o", "json"]);
    let catalog: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let ids: Vec<&str> = catalog.as_array().unwrap().iter().map(|a| a["id"].as_str().unwrap()).collect();
    assert!(ids.contains(&"view_products"));
    assert!(ids.contains(&"process_returns"));
    assert_eq!(ids.len(), 6);
}

#[test]
fn test_list_and_remove() {
    let dir = TempDir::new().unwrap();
    let perso_dir = dir.path();

    run_perso(perso_dir, &["persona", "new", "alpha"]);
    run_perso(perso_dir, &["persona", "compile", "alpha"]);
    run_perso(perso_dir, &["persona", "new", "beta"]);
    run_perso(perso_dir, &["persona", "compile", "beta"]);

    let stdout = run_perso_stdout(perso_dir, &["persona", "list", "-o", "json"]);
    let list: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["name"], "alpha");
    assert_eq!(list[1]["name"], "beta");

    let output = run_perso(perso_dir, &["persona", "remove", "alpha", "--force"]);
    assert!(output.status.success());

    let stdout = run_perso_stdout(perso_dir, &["persona", "list", "-o", "json"]);
    let list: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "beta");
}

#[test]
fn test_status_reports_counts() {
    let dir = TempDir::new().unwrap();
    let perso_dir = dir.path();

    run_perso(perso_dir, &["persona", "new", "counted"]);
    run_perso(perso_dir, &["persona", "compile", "counted"]);
    run_perso(perso_dir, &["persona", "new", "pending"]);

    let stdout = run_perso_stdout(perso_dir, &["status", "-o", "json"]);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["personas"].as_array().unwrap().len(), 1);
    assert!(
        status["drafts"]
            .as_array()
            .unwrap()
            .iter()
            .any(|d| d == "pending")
    );
    assert!(!status["version"].as_str().unwrap().is_empty());
}

#[test]
fn test_config_show_honors_perso_dir() {
    let dir = TempDir::new().unwrap();
    let perso_dir = dir.path();

    let stdout = run_perso_stdout(perso_dir, &["config", "show", "-o", "json"]);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let personas = config["paths"]["personas"].as_str().unwrap();
    assert!(personas.starts_with(perso_dir.to_str().unwrap()));
}
