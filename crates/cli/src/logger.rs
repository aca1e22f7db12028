//! Run-scoped logger for the `trowel` binary.
//!
//! Every record goes to stderr; with `--log-file` it is also appended to the
//! given file, under a header naming the run.

use anyhow::{Context, Result};
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub struct TrowelLogger {
    level: LevelFilter,
    file: Option<Arc<Mutex<File>>>,
    run_id: String,
}

impl TrowelLogger {
    /// Creates a logger; `path` is opened in append mode when given.
    pub fn new(level: LevelFilter, path: Option<&Path>) -> Result<Self> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let uuid = Uuid::new_v4().to_string();
        let short = uuid.split('-').next().unwrap_or("run");
        let run_id = format!("{timestamp}_{short}");

        let file = match path {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("failed to open log file {}", path.display()))?;
                Some(Arc::new(Mutex::new(file)))
            }
            None => None,
        };

        Ok(Self {
            level,
            file,
            run_id,
        })
    }

    /// Installs the logger as the global `log` backend.
    pub fn init(level: LevelFilter, path: Option<&Path>) -> Result<()> {
        let logger = Self::new(level, path)?;
        let run_id = logger.run_id.clone();
        log::set_boxed_logger(Box::new(logger))
            .map(|()| log::set_max_level(level))
            .map_err(|err| anyhow::anyhow!("failed to set logger: {err}"))?;

        log::debug!("trowel run {run_id}");
        if let Some(path) = path {
            log::debug!("logging to {}", path.display());
        }
        Ok(())
    }

    fn format(record: &Record) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        format!(
            "{timestamp} {} [{}] {}",
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for TrowelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = Self::format(record);
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                // A failed write must not abort the replay
                let _ = writeln!(file, "{message}");
            }
        }
        eprintln!("{message}");
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}
