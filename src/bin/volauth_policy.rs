//!
//! volauth policy tool
//! -------------------
//! Inspect, clean, merge and subtract volume policy files.
//! Configuration via VOLAUTH_* environment variables and CLI flags.

use anyhow::Result;
use std::env;
use tracing_subscriber::EnvFilter;

use volauth::config::ToolConfig;
use volauth::tools::policytool;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", policytool::USAGE);
        return Ok(());
    }

    let cfg = ToolConfig::from_env();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();

    let out = policytool::run(&args, &cfg)?;
    println!("{}", out);
    Ok(())
}
