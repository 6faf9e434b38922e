use chrono::{DateTime, Utc};
use colored::*;
use log::{Level, Metadata, Record};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use uuid::Uuid;

static IMAGEGEN_LOGGER: Lazy<ImagegenLogger> = Lazy::new(ImagegenLogger::new);

pub fn init_with_config(config: LoggerConfig) -> Result<(), String> {
    IMAGEGEN_LOGGER.update_config(config.clone());

    if let Err(e) = log::set_logger(&*IMAGEGEN_LOGGER) {
        return Err(format!("Failed to set logger: {:?}", e));
    }

    log::set_max_level(config.min_level.to_log_level_filter());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Trace => Color::Cyan,
            LogLevel::Debug => Color::Blue,
            LogLevel::Info => Color::Green,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            LogLevel::Trace => "🔍",
            LogLevel::Debug => "🐛",
            LogLevel::Info => "💡",
            LogLevel::Warn => "⚠️",
            LogLevel::Error => "❌",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Case-insensitive parse of a level name, as found in `TITAN_LOG_LEVEL`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn to_log_level(&self) -> Level {
        match self {
            LogLevel::Trace => Level::Trace,
            LogLevel::Debug => Level::Debug,
            LogLevel::Info => Level::Info,
            LogLevel::Warn => Level::Warn,
            LogLevel::Error => Level::Error,
        }
    }

    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        self.to_log_level().to_level_filter()
    }

    pub fn from_log_level(level: Level) -> Self {
        match level {
            Level::Trace => LogLevel::Trace,
            Level::Debug => LogLevel::Debug,
            Level::Info => LogLevel::Info,
            Level::Warn => LogLevel::Warn,
            Level::Error => LogLevel::Error,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    pub module: String,
    pub file: String,
    pub line: u32,
    pub thread_id: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: String, module: String, file: String, line: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            level,
            message,
            module,
            file,
            line,
            thread_id: format!("{:?}", std::thread::current().id()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub show_colors: bool,
    pub show_emojis: bool,
    pub show_thread_id: bool,
    pub show_file_location: bool,
    pub show_module: bool,
    pub include_timestamp: bool,
    pub timestamp_format: String,
    pub output_json: bool,
    pub log_to_file: bool,
    pub log_file_path: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            show_colors: true,
            show_emojis: true,
            show_thread_id: false,
            show_file_location: false,
            show_module: true,
            include_timestamp: true,
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            output_json: false,
            log_to_file: false,
            log_file_path: "titan-imagegen.log".to_string(),
        }
    }
}

impl LoggerConfig {
    /// Starts from `development()` and applies `TITAN_LOG_LEVEL`,
    /// `TITAN_LOG_JSON` and `TITAN_LOG_FILE` when set.
    pub fn from_env() -> Self {
        let mut config = Self::development();

        if let Some(level) = env::var("TITAN_LOG_LEVEL")
            .ok()
            .and_then(|name| LogLevel::parse(&name))
        {
            config.min_level = level;
        }
        if env::var("TITAN_LOG_JSON").map_or(false, |val| val == "true") {
            config = config.with_json_output(true).with_colors(false);
        }
        if let Ok(path) = env::var("TITAN_LOG_FILE") {
            config = config.with_file_output(&path);
        }

        config
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.show_colors = enabled;
        self
    }

    pub fn with_file_output(mut self, path: &str) -> Self {
        self.log_to_file = true;
        self.log_file_path = path.to_string();
        self
    }

    pub fn with_json_output(mut self, enabled: bool) -> Self {
        self.output_json = enabled;
        self
    }

    pub fn development() -> Self {
        Self {
            min_level: LogLevel::Debug,
            show_colors: true,
            show_emojis: true,
            output_json: false,
            show_file_location: true,
            ..Default::default()
        }
    }
}

pub struct ImagegenLogger {
    config: Arc<Mutex<LoggerConfig>>,
    log_file: Arc<Mutex<Option<File>>>,
}

impl ImagegenLogger {
    pub fn new() -> Self {
        Self {
            config: Arc::new(Mutex::new(LoggerConfig::default())),
            log_file: Arc::new(Mutex::new(None)),
        }
    }

    pub fn update_config(&self, new_config: LoggerConfig) {
        if new_config.log_to_file {
            match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&new_config.log_file_path)
            {
                Ok(file) => {
                    if let Ok(mut log_file) = self.log_file.lock() {
                        *log_file = Some(file);
                    }
                }
                Err(e) => eprintln!(
                    "Could not open log file {}: {}",
                    new_config.log_file_path, e
                ),
            }
        }

        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }
    }

    fn format_console_output(&self, entry: &LogEntry, config: &LoggerConfig) -> String {
        let mut output = String::new();

        if config.include_timestamp {
            let timestamp = entry.timestamp.format(&config.timestamp_format).to_string();
            if config.show_colors {
                output.push_str(&format!("{} ", timestamp.bright_black()));
            } else {
                output.push_str(&format!("{} ", timestamp));
            }
        }

        let level_str = if config.show_emojis {
            format!("{} {}", entry.level.emoji(), entry.level.as_str())
        } else {
            entry.level.as_str().to_string()
        };

        if config.show_colors {
            output.push_str(&format!(
                "[{}] ",
                level_str.color(entry.level.color()).bold()
            ));
        } else {
            output.push_str(&format!("[{}] ", level_str));
        }

        if config.show_module && !entry.module.is_empty() {
            if config.show_colors {
                output.push_str(&format!("{}::", entry.module.bright_blue()));
            } else {
                output.push_str(&format!("{}::", entry.module));
            }
        }

        if config.show_colors {
            output.push_str(&entry.message.white().bold().to_string());
        } else {
            output.push_str(&entry.message);
        }

        if config.show_thread_id {
            output.push_str(&format!(" [thread:{}]", entry.thread_id));
        }

        if config.show_file_location {
            let location = format!("{}:{}", entry.file, entry.line);
            if config.show_colors {
                output.push_str(&format!(" ({})", location.bright_black()));
            } else {
                output.push_str(&format!(" ({})", location));
            }
        }

        output
    }

    fn write_to_file(&self, entry: &LogEntry, config: &LoggerConfig) {
        if let Ok(mut log_file_guard) = self.log_file.lock() {
            if let Some(ref mut file) = *log_file_guard {
                let content = if config.output_json {
                    serde_json::to_string(entry).unwrap_or_default() + "\n"
                } else {
                    let plain = LoggerConfig {
                        show_colors: false,
                        ..config.clone()
                    };
                    self.format_console_output(entry, &plain) + "\n"
                };
                let _ = file.write_all(content.as_bytes());
                let _ = file.flush();
            }
        }
    }

    fn create_log_entry(&self, record: &Record) -> LogEntry {
        LogEntry::new(
            LogLevel::from_log_level(record.level()),
            record.args().to_string(),
            record.module_path().unwrap_or("unknown").to_string(),
            record.file().unwrap_or("unknown").to_string(),
            record.line().unwrap_or(0),
        )
    }
}

impl Default for ImagegenLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl log::Log for ImagegenLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if let Ok(config) = self.config.lock() {
            metadata.level() <= config.min_level.to_log_level()
        } else {
            true
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = self.create_log_entry(record);

        if let Ok(config) = self.config.lock() {
            if config.output_json {
                println!("{}", serde_json::to_string(&entry).unwrap_or_default());
            } else {
                println!("{}", self.format_console_output(&entry, &config));
            }

            if config.log_to_file {
                self.write_to_file(&entry, &config);
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        if let Ok(mut log_file_guard) = self.log_file.lock() {
            if let Some(ref mut file) = *log_file_guard {
                let _ = file.flush();
            }
        }
    }
}

/// Logs how long a generation round trip took when dropped.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        log::debug!("⏱️  Starting timer: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::info!(
            "⏱️  {} completed in {}ms",
            self.name,
            self.elapsed().as_millis()
        );
    }
}

pub fn timer(name: &str) -> Timer {
    Timer::new(name)
}

pub fn log_startup_info(app_name: &str, version: &str, config: &crate::config::BedrockConfig) {
    log::info!("🚀 Starting {} v{}", app_name, version);
    log::info!("⚙️  Configuration loaded:");
    log::info!("   Region: {}", config.region());
    log::info!("   Model: {}", config.model_id());
    log::info!(
        "   Explicit credentials: {}",
        if config.access_key.is_some() && config.secret_key.is_some() {
            "✅"
        } else {
            "❌ (default credential chain)"
        }
    );
}
