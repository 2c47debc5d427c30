//! Offline driver for the policy algebra over JSON files.
//!
//! `show FILE`, `clean FILE`, `merge BASE OTHER`, `subtract BASE OTHER`.
//! Files hold a `UserPolicy` (`own_vols` / `authorized_vols`).

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::ToolConfig;
use crate::identity::UserPolicy;

pub const USAGE: &str = "volauth_policy\n\nUSAGE:\n  volauth_policy [--compact] [--no-clean] show FILE\n  volauth_policy [--compact] clean FILE\n  volauth_policy [--compact] [--no-clean] merge BASE OTHER\n  volauth_policy [--compact] [--no-clean] subtract BASE OTHER\n\nENV:\n  VOLAUTH_LOG, VOLAUTH_PRETTY, VOLAUTH_AUTO_CLEAN\n";

pub fn load_policy(path: &Path) -> Result<UserPolicy> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let p = serde_json::from_slice::<UserPolicy>(&bytes).map_err(crate::error::Error::from)
        .with_context(|| format!("decode {}", path.display()))?;
    Ok(p)
}

fn file_arg<'a>(rest: &'a [String], i: usize) -> Result<&'a Path> {
    rest.get(i)
        .map(Path::new)
        .ok_or_else(|| anyhow!(crate::error::Error::usage(format!("'{}' needs {} file argument(s)", rest[0], i))))
}

fn render(p: &UserPolicy, cfg: &ToolConfig) -> Result<String> {
    let s = if cfg.pretty { serde_json::to_string_pretty(p)? } else { serde_json::to_string(p)? };
    Ok(s)
}

/// Run one command. `args` excludes the program name; flags are honoured anywhere.
pub fn run(args: &[String], cfg: &ToolConfig) -> Result<String> {
    let mut cfg = cfg.clone();
    let rest = cfg.apply_args(args);
    let Some(cmd) = rest.first() else { return Err(anyhow!(crate::error::Error::usage("missing command"))); };
    let out = match cmd.as_str() {
        "show" => load_policy(file_arg(&rest, 1)?)?,
        "clean" => load_policy(file_arg(&rest, 1)?)?.dedup(),
        "merge" | "subtract" => {
            let base = load_policy(file_arg(&rest, 1)?)?;
            let other = load_policy(file_arg(&rest, 2)?)?;
            if cmd.as_str() == "merge" { base.merge_in(&other); } else { base.subtract_out(&other); }
            info!(target: "volauth::tool", "{} base own_vols={} authorized_vols={} clean={}",
                cmd, base.own_vols().len(), base.authorized_vols().len(), cfg.auto_clean);
            if cfg.auto_clean { base.dedup() } else { base }
        }
        other => return Err(anyhow!(crate::error::Error::usage(format!("unknown command '{}'", other)))),
    };
    render(&out, &cfg)
}
