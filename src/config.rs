use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::input::InvocationRecord;
use crate::presets::PRESETS;

pub const CONFIG_FILENAME: &str = "hook-rules.yaml";

/// Explicit rules file, overrides discovery
pub const RULES_ENV: &str = "HOOK_RULES";

/// Conditions that make a rule deny a tool call
#[derive(Debug, Clone, Deserialize)]
pub struct When {
    /// Glob pattern over the tool name
    pub tool_name: String,
    /// Optional: restrict `input_contains` to this string field of tool_input
    pub input_field: Option<String>,
    /// Optional: substring that must appear in the tool input
    pub input_contains: Option<String>,
}

/// A single deny rule
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    /// Name of the rule (for deny reasons and logs)
    pub name: String,
    pub when: When,
    /// Reason reported to the host; a default is derived from the name
    pub reason: Option<String>,
}

/// Raw configuration structure (as parsed from YAML)
#[derive(Debug, Deserialize)]
struct RulesConfigRaw {
    /// Built-in or XDG preset names to include
    presets: Option<Vec<String>>,
    /// Custom rule definitions
    rules: Option<Vec<Rule>>,
}

/// Preset file structure
#[derive(Debug, Deserialize)]
struct PresetFile {
    rules: Vec<Rule>,
}

/// Resolved rules (presets expanded, presets first)
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

/// Directory holding user presets: $XDG_CONFIG_HOME/hook-dispatch/presets
fn presets_dir() -> PathBuf {
    let xdg_config = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
            PathBuf::from(home).join(".config")
        });
    xdg_config.join("hook-dispatch").join("presets")
}

/// Resolves preset names to their rules. A built-in preset shadows a file
/// of the same name in `presets_dir`; file presets are validated like user
/// rules.
fn resolve_presets(
    preset_names: &[String],
    presets_dir: &Path,
    config_path: &Path,
) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();

    for name in preset_names {
        if let Some(builtin) = PRESETS.get(name.as_str()) {
            rules.extend(builtin.iter().cloned());
            continue;
        }

        let preset_path = presets_dir.join(format!("{}.yaml", name));
        if !preset_path.is_file() {
            bail!(
                "Invalid config at {}: preset '{}' is not built in and not found at {}",
                config_path.display(),
                name,
                preset_path.display()
            );
        }

        let content = fs::read_to_string(&preset_path)
            .with_context(|| format!("Failed to read preset file: {}", preset_path.display()))?;
        let preset: PresetFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse preset file: {}", preset_path.display()))?;

        for rule in &preset.rules {
            validate_rule(rule, &preset_path)?;
        }
        rules.extend(preset.rules);
    }

    Ok(rules)
}

/// Validates a rule definition
fn validate_rule(rule: &Rule, config_path: &Path) -> Result<()> {
    if rule.name.trim().is_empty() {
        bail!(
            "Invalid config at {}: rule missing 'name'",
            config_path.display()
        );
    }
    if rule.when.tool_name.is_empty() {
        bail!(
            "Invalid config at {}: rule '{}' missing 'when.tool_name'",
            config_path.display(),
            rule.name
        );
    }
    if let Err(err) = glob::Pattern::new(&rule.when.tool_name) {
        bail!(
            "Invalid config at {}: rule '{}' has invalid glob '{}': {}",
            config_path.display(),
            rule.name,
            rule.when.tool_name,
            err
        );
    }
    if rule.when.input_contains.as_deref().is_some_and(str::is_empty) {
        bail!(
            "Invalid config at {}: rule '{}' has an empty 'when.input_contains'",
            config_path.display(),
            rule.name
        );
    }
    if rule.when.input_field.is_some() && rule.when.input_contains.is_none() {
        bail!(
            "Invalid config at {}: rule '{}' sets 'when.input_field' without 'when.input_contains'",
            config_path.display(),
            rule.name
        );
    }
    if rule.reason.as_deref().is_some_and(|r| r.trim().is_empty()) {
        bail!(
            "Invalid config at {}: rule '{}' has a blank 'reason'",
            config_path.display(),
            rule.name
        );
    }
    Ok(())
}

/// Loads and parses a hook-rules.yaml file.
/// Resolves presets and merges them with custom rules.
pub fn load_config(config_path: &Path) -> Result<RuleSet> {
    load_config_with_presets(config_path, &presets_dir())
}

fn load_config_with_presets(config_path: &Path, presets_dir: &Path) -> Result<RuleSet> {
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

    // An empty file is a valid "no rules" config
    if content.trim().is_empty() {
        return Ok(RuleSet::default());
    }

    let parsed: RulesConfigRaw = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

    let user_rules = parsed.rules.unwrap_or_default();

    // Validate user rules (built-in presets are trusted)
    for rule in &user_rules {
        validate_rule(rule, config_path)?;
    }

    // Merge: presets first, then user rules
    let mut merged = match &parsed.presets {
        Some(presets) => resolve_presets(presets, presets_dir, config_path)?,
        None => Vec::new(),
    };
    merged.extend(user_rules);

    Ok(RuleSet { rules: merged })
}

/// Finds the nearest hook-rules.yaml by walking up from a directory
/// to the filesystem root.
pub fn find_nearest_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Resolve the rules that apply to this invocation.
///
/// `$HOOK_RULES` wins and must point at a readable file. Otherwise the
/// nearest rules file above the session's cwd is used, and no file at all
/// means no rules.
pub fn resolve(record: &InvocationRecord) -> Result<RuleSet> {
    if let Some(explicit) = std::env::var_os(RULES_ENV).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(explicit);
        tracing::debug!(path = %path.display(), "loading rules from {}", RULES_ENV);
        return load_config(&path);
    }

    let start_dir = match record.cwd() {
        Some(cwd) => PathBuf::from(cwd),
        None => std::env::current_dir().context("Failed to determine working directory")?,
    };

    match find_nearest_config(&start_dir) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading rules");
            load_config(&path)
        }
        None => {
            tracing::debug!(start = %start_dir.display(), "no rules file found");
            Ok(RuleSet::default())
        }
    }
}
