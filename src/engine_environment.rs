//! Owns the instances that live for the whole lifetime of a session: the
//! storage manager, the parsing/dispatch engine, and the logging guard.

use std::error::Error;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::EngineConfig;
use crate::repl::Engine;
use storage_api::StorageManager;

/// The running session's engine and the config it was built from.
#[derive(Debug)]
pub struct EngineEnvironment {
    pub engine: Engine,
    pub config: EngineConfig,
}

impl EngineEnvironment {
    pub fn new(config: EngineConfig) -> Self {
        let storage = StorageManager::new(
            config.storage.buffer_pages.get(),
            config.storage.data_dir.clone(),
        );
        Self {
            engine: Engine::new(storage),
            config,
        }
    }
}

/// Installs a console layer and a daily-rolling JSON file layer under
/// `log_dir`. The returned guard must be kept alive for the life of the
/// process; dropping it stops the background flush task.
pub fn init_logging(log_dir: &Path) -> Result<WorkerGuard, Box<dyn Error + Send + Sync>> {
    let file_appender = tracing_appender::rolling::daily(log_dir, "trdb.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .json()
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
