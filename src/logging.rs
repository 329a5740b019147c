//! Hluda Logging System
//!
//! Timestamped, leveled console output with an optional log file that starts
//! with a run information header

use chrono::Local;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

static LOGGER: OnceLock<Mutex<HludaLogger>> = OnceLock::new();

// ============================================================================
// Run Information
// ============================================================================

#[derive(Debug, Clone)]
pub struct RunInfo {
    pub tool_version: String,
    pub upstream: String,
    pub repository: String,
    pub author: String,
    pub preferred_version: Option<String>,
}

impl RunInfo {
    pub fn to_log_header(&self) -> String {
        format!(
r#"================================================================================
MagiskHluda Log - {}
================================================================================
Tool:          magisk-hluda v{}
Run Info:
  Upstream:    {}
  Repository:  {}
  Author:      {}
  Requested:   {}
================================================================================
"#,
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.tool_version,
            self.upstream,
            self.repository,
            self.author,
            self.preferred_version.as_deref().unwrap_or("latest"),
        )
    }
}

// ============================================================================
// Log Levels
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Info,
    Download,
    Skip, // Releases passed over during auto-pick
    Warning,
    Error,
}

impl LogLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Info => "[INFO]",
            LogLevel::Download => "[DOWNLOAD]",
            LogLevel::Skip => "[SKIP]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Error => "[ERROR]",
        }
    }

    fn is_diagnostic(&self) -> bool {
        matches!(self, LogLevel::Warning | LogLevel::Error)
    }
}

// ============================================================================
// Hluda Logger
// ============================================================================

#[derive(Default)]
pub struct HludaLogger {
    log_file: Option<File>,
}

impl HludaLogger {
    /// Console-only logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger that also appends to a timestamped file in `log_dir`
    pub fn with_log_dir(log_dir: &Path, info: &RunInfo) -> Self {
        let _ = fs::create_dir_all(log_dir);

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("hluda_{}.log", timestamp));

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .ok();

        let mut logger = Self { log_file };
        logger.write_file(&info.to_log_header());
        logger
    }

    fn write_file(&mut self, msg: &str) {
        if let Some(ref mut file) = self.log_file {
            let _ = writeln!(file, "{}", msg);
            let _ = file.flush();
        }
    }

    pub fn log(&mut self, level: LogLevel, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S");
        let formatted = format!("[{}] {} {}", timestamp, level.prefix(), message);
        self.write_file(&formatted);

        if level.is_diagnostic() {
            eprintln!("{}", formatted);
        } else {
            println!("{}", formatted);
        }
    }
}

// ============================================================================
// Global Logger Access
// ============================================================================

/// Initialize the global logger (call once at startup).
///
/// With `log_dir` set, every line is mirrored into a log file there.
/// Later calls are ignored.
pub fn init_logger(log_dir: Option<&Path>, info: &RunInfo) {
    LOGGER.get_or_init(|| {
        Mutex::new(match log_dir {
            Some(dir) => HludaLogger::with_log_dir(dir, info),
            None => HludaLogger::new(),
        })
    });
}

fn logger() -> &'static Mutex<HludaLogger> {
    LOGGER.get_or_init(|| Mutex::new(HludaLogger::new()))
}

// ============================================================================
// Convenience Logging Functions
// ============================================================================

pub fn log_info(message: &str) {
    logger().lock().log(LogLevel::Info, message);
}

pub fn log_download(message: &str) {
    logger().lock().log(LogLevel::Download, message);
}

pub fn log_skip(message: &str) {
    logger().lock().log(LogLevel::Skip, message);
}

pub fn log_warning(message: &str) {
    logger().lock().log(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    logger().lock().log(LogLevel::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> RunInfo {
        RunInfo {
            tool_version: "1.2.0".to_string(),
            upstream: "Ylarod/Florida".to_string(),
            repository: "znmn/magiskhluda".to_string(),
            author: "The Community".to_string(),
            preferred_version: None,
        }
    }

    #[test]
    fn test_log_header() {
        let header = sample_info().to_log_header();
        assert!(header.contains("magisk-hluda v1.2.0"));
        assert!(header.contains("Upstream:    Ylarod/Florida"));
        assert!(header.contains("Requested:   latest"));
    }

    #[test]
    fn test_log_file_receives_header_and_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut logger = HludaLogger::with_log_dir(dir.path(), &sample_info());
        logger.log(LogLevel::Skip, "Skipping release 17.0.0 (no server assets)");
        drop(logger);

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let path = entries[0].as_ref().unwrap().path();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("===="));
        assert!(content.contains("[SKIP] Skipping release 17.0.0"));
    }
}
