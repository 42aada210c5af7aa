//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so it logs to a file. The print command logs
//! to stderr. Initialization is best-effort: if the log file cannot be
//! opened, logging stays off.

use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log events go.
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init(target: LogTarget<'_>, level: &str) {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(level));

    match target {
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                if std::fs::create_dir_all(parent).is_err() {
                    return;
                }
            }
            let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(path) else {
                return;
            };
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        LogTarget::Stderr => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
}
