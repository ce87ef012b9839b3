//! Top-level program driver: wires the CLI entry selection to the
//! configuration, the singleton lock, daemonization and the dispatch
//! loops.
//!
//! Frontends call [`run`] from their platform entry context and map the
//! result onto the process exit status.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::{Args, Entry};
use crate::config::{self, Snapshot};
use crate::daemonize;
use crate::dispatch;
use crate::lock::InstanceLock;
use crate::paths;
use crate::platform::Platform;

/// Runs the entry point selected by `args` against `platform`, using the
/// canonical per-user configuration directory.
pub fn run<P: Platform + ?Sized>(args: &Args, platform: &mut P) -> Result<()> {
    run_in(args, platform, &paths::config_dir())
}

/// As [`run`], with the configuration directory made explicit.
pub fn run_in<P: Platform + ?Sized>(args: &Args, platform: &mut P, config_dir: &Path) -> Result<()> {
    match args.entry() {
        Entry::ListKeys => {
            list_keys(platform);
            Ok(())
        }
        Entry::Oneshot(mode) => {
            let mut snapshot = load_snapshot(platform, config_dir)?;
            dispatch::oneshot(platform, &mut snapshot, mode);
            Ok(())
        }
        Entry::Daemon { foreground } => {
            std::fs::create_dir_all(config_dir).with_context(|| {
                format!("failed to create config directory {}", config_dir.display())
            })?;
            let mut snapshot = load_snapshot(platform, config_dir)?;

            // Taken before detaching so a second instance fails on the
            // caller's terminal, and held until the process exits.
            let _lock = InstanceLock::acquire(&config_dir.join(paths::LOCK_FILE_NAME))?;

            if !foreground {
                daemonize::daemonize(&config_dir.join(paths::LOG_FILE_NAME))?;
            }

            println!(
                "[daemon] keywarp {} started at {}",
                env!("CARGO_PKG_VERSION"),
                chrono::Local::now().to_rfc3339()
            );
            dispatch::main_loop(platform, &mut snapshot);
            Ok(())
        }
    }
}

/// Loads and resolves the configuration, falling back to the defaults
/// (with a logged warning) when the file is missing or unreadable. An
/// unresolvable binding is fatal: no mode may run against a null binding.
fn load_snapshot<P: Platform + ?Sized>(platform: &P, config_dir: &Path) -> Result<Snapshot> {
    let path = config_dir.join(paths::CONFIG_FILE_NAME);
    let cfg = config::load_or_default(&path).unwrap_or_else(|err| {
        eprintln!("[config] error (using defaults): {err:#}");
        config::Config::default()
    });
    Snapshot::resolve(&cfg, platform)
}

/// Prints every key name the backend's table knows, one per line.
fn list_keys<P: Platform + ?Sized>(platform: &P) {
    for code in 0..=u8::MAX {
        if let Some(name) = platform.key_name(code) {
            println!("{name}");
        }
    }
}
