use std::env;

use serde::{Deserialize, Serialize};

/// Settings for the policy tool. Layered as defaults, then environment, then flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolConfig {
    /// tracing filter used when RUST_LOG is unset
    pub log_filter: String,
    pub pretty: bool,
    /// Deduplicate merge/subtract results before printing
    pub auto_clean: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self { log_filter: "info".to_string(), pretty: true, auto_clean: true }
    }
}

pub fn parse_bool(v: &str) -> Option<bool> {
    match v.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_bool_env(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|v| parse_bool(&v))
}

impl ToolConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(f) = env::var("VOLAUTH_LOG") { if !f.is_empty() { cfg.log_filter = f; } }
        if let Some(b) = parse_bool_env("VOLAUTH_PRETTY") { cfg.pretty = b; }
        if let Some(b) = parse_bool_env("VOLAUTH_AUTO_CLEAN") { cfg.auto_clean = b; }
        cfg
    }

    /// Apply flags and return the remaining positional arguments.
    pub fn apply_args(&mut self, args: &[String]) -> Vec<String> {
        let mut rest = Vec::new();
        for a in args {
            match a.as_str() {
                "--compact" => self.pretty = false,
                "--pretty" => self.pretty = true,
                "--no-clean" => self.auto_clean = false,
                "--clean" => self.auto_clean = true,
                _ => rest.push(a.clone()),
            }
        }
        rest
    }
}
