use std::fs;

use anyhow::Context;
use anyhow::Result;
use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;
use tracing::Level;
use tracing::event;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::prelude::*;

pub const LOG_DIR_VARIABLE: &str = "ROTA_LOG_DIR";
pub const TRACING_LEVEL_VARIABLE: &str = "ROTA_TRACING_LEVEL";

#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum LogLevel
{
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel
{
    pub fn to_level_string(&self) -> String
    {
        match self {
            LogLevel::Trace => "trace".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Error => "error".to_string(),
        }
    }
}

/// Installs the global JSON subscriber.
///
/// Logs go to `rota.log` in `ROTA_LOG_DIR` when that is set and to stderr
/// otherwise. `level` overrides `ROTA_TRACING_LEVEL`; with neither, `info` is
/// used. Keep the returned guard alive until the program exits or buffered
/// lines are lost.
pub fn setup_logging(level: Option<LogLevel>) -> Result<WorkerGuard>
{
    let (non_blocking, guard) = match dotenvy::var(LOG_DIR_VARIABLE) {
        Ok(log_dir) => {
            fs::create_dir_all(&log_dir)
                .with_context(|| format!("Could not create log directory {}", log_dir))?;
            let file_appender = tracing_appender::rolling::never(&log_dir, "rota.log");
            tracing_appender::non_blocking(file_appender)
        }
        Err(_) => tracing_appender::non_blocking(std::io::stderr()),
    };

    let env_filter = match level {
        Some(level) => EnvFilter::new(level.to_level_string()),
        None => dotenvy::var(TRACING_LEVEL_VARIABLE)
            .ok()
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new("info")),
    };

    let layer = fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_current_span(true)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .context("A global tracing subscriber was already installed")?;

    event!(Level::DEBUG, "starting logging");
    Ok(guard)
}
