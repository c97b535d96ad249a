use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    /// Appends to a file. Used while the TUI owns the screen.
    File(PathBuf),
}

/// Installs `env_logger`. `RUST_LOG` overrides the default `info` filter.
pub fn init(target: LogTarget) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    if let LogTarget::File(path) = &target {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("installing logger")?;
    Ok(())
}
