use std::path::PathBuf;

use color_eyre::Report;
use directories::ProjectDirs;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    Layer, filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level for file output
    pub file_level: Level,
    /// Log level for console output
    pub console_level: Level,
    /// Directory where log files are written; `None` disables file logging
    pub log_dir: Option<PathBuf>,
    /// Whether to write JSON formatted file logs for structured output
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_level: Level::DEBUG,
            console_level: Level::WARN,
            log_dir: Some(Self::default_log_dir()),
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Get the OS-appropriate default log directory
    pub fn default_log_dir() -> PathBuf {
        match ProjectDirs::from("", "", "glyphshelf") {
            // ~/.cache/glyphshelf, ~/Library/Caches/glyphshelf, %LOCALAPPDATA%\glyphshelf\cache
            Some(proj_dirs) => proj_dirs.cache_dir().to_path_buf(),
            None => PathBuf::from("glyphshelf-logs"),
        }
    }

    /// Create logging configuration from `GLYPHSHELF_*` environment variables
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by environment variable name.
    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        let level = |key: &str| var(key).and_then(|v| v.parse::<Level>().ok());

        if let Some(level) = level("GLYPHSHELF_LOG_LEVEL") {
            self.file_level = level;
            self.console_level = level;
        }

        if let Some(level) = level("GLYPHSHELF_FILE_LOG_LEVEL") {
            self.file_level = level;
        }

        if let Some(level) = level("GLYPHSHELF_CONSOLE_LOG_LEVEL") {
            self.console_level = level;
        }

        if let Some(log_dir) = var("GLYPHSHELF_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(log_dir));
        }

        if var("GLYPHSHELF_NO_FILE_LOGS").is_some() {
            self.log_dir = None;
        }

        if var("GLYPHSHELF_JSON_LOGS").is_some() {
            self.json_format = true;
        }

        self
    }
}

/// Initialize the logging system with the given configuration.
///
/// The returned guard flushes the file appender when dropped; keep it alive
/// for the duration of the program.
pub fn init_logging(config: LoggingConfig) -> Result<Option<WorkerGuard>, Report> {
    let mut layers = vec![];
    let mut guard = None;

    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)?;

        let file_appender = tracing_appender::rolling::daily(log_dir, "glyphshelf-atlas.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        let file_filter = EnvFilter::builder()
            .with_default_directive(config.file_level.into())
            .from_env_lossy();

        let file_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(file_filter)
                .boxed()
        } else {
            fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_filter(file_filter)
                .boxed()
        };

        layers.push(file_layer);
    }

    let console_filter = EnvFilter::builder()
        .with_default_directive(config.console_level.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter)
        .boxed();

    layers.push(console_layer);

    tracing_subscriber::registry().with(layers).try_init()?;

    Ok(guard)
}
