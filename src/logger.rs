//! Logging setup for the appbundle binaries
//!
//! Plain output goes through `env_logger`. A `json:` prefix on the level
//! (e.g. `json:debug`) switches to one JSON object per line, written to
//! `APPBUNDLE_LOG_PATH` when set and stderr otherwise.

use chrono::{Local, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;
use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

pub const LOG_LEVEL_ENV: &str = "APPBUNDLE_LOG_LEVEL";
pub const LOG_PATH_ENV: &str = "APPBUNDLE_LOG_PATH";

/// JSON lines logger
#[derive(Debug)]
pub struct JsonLogger {
    level: Level,
    target_file: Mutex<Option<std::fs::File>>,
}

/// Split a level spec into (json output?, level name)
fn split_level_spec(spec: &str) -> (bool, &str) {
    if let Some(stripped) = spec.strip_prefix("json:") {
        (true, stripped)
    } else if spec == "json" {
        (true, "info")
    } else {
        (false, spec)
    }
}

fn parse_level_filter(name: &str) -> LevelFilter {
    match name.to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}

impl JsonLogger {
    pub fn new(level: Level, log_path: Option<String>) -> Self {
        let target_file = log_path
            .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());

        JsonLogger {
            level,
            target_file: Mutex::new(target_file),
        }
    }

    /// Initialize the global logger from a level spec such as `debug` or `json:trace`
    pub fn init_with_level(level_spec: &str) {
        let (use_json, level_name) = split_level_spec(level_spec);
        let filter = parse_level_filter(level_name);

        if !use_json {
            let result = env_logger::Builder::new()
                .filter_level(filter)
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "[{} {} {}] {}",
                        Local::now().format("%Y-%m-%dT%H:%M:%S"),
                        record.level(),
                        record.target(),
                        record.args()
                    )
                })
                .try_init();
            if let Err(e) = result {
                eprintln!("Failed to initialize logger: {e}");
            }
            return;
        }

        let Some(level) = filter.to_level() else {
            log::set_max_level(LevelFilter::Off);
            return;
        };

        let logger = Box::new(JsonLogger::new(level, env::var(LOG_PATH_ENV).ok()));
        if let Err(e) = log::set_boxed_logger(logger) {
            eprintln!("Failed to initialize JSON logger: {e}");
            return;
        }
        log::set_max_level(filter);
    }

    /// Initialize from `APPBUNDLE_LOG_LEVEL`, defaulting to warnings only
    pub fn init() {
        let spec = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "warn".to_string());
        Self::init_with_level(&spec);
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut guard) = self.target_file.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.write_all(line.as_bytes());
                let _ = file.flush();
                return;
            }
        }
        let _ = io::stderr().write_all(line.as_bytes());
    }
}

impl Log for JsonLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = json!({
            "@timestamp": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            "@level": record.level().to_string().to_lowercase(),
            "@message": record.args().to_string(),
            "@module": record.target(),
            "@pid": std::process::id(),
        });

        self.write_line(&format!(
            "{}\n",
            serde_json::to_string(&entry).unwrap_or_default()
        ));
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.target_file.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.flush();
            }
        }
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_level_spec() {
        assert_eq!(split_level_spec("json:debug"), (true, "debug"));
        assert_eq!(split_level_spec("json"), (true, "info"));
        assert_eq!(split_level_spec("trace"), (false, "trace"));
    }

    #[test]
    fn test_parse_level_filter() {
        assert_eq!(parse_level_filter("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level_filter("off"), LevelFilter::Off);
        assert_eq!(parse_level_filter("bogus"), LevelFilter::Warn);
    }

    #[test]
    fn test_repeated_init_is_reported_not_fatal() {
        JsonLogger::init_with_level("warn");
        // A global logger is already installed; both branches report and return
        JsonLogger::init_with_level("error");
        JsonLogger::init_with_level("json:error");
        log::warn!("still logging after failed re-initialization");
    }

    #[test]
    fn test_json_logger_writes_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("log.jsonl");
        let logger = JsonLogger::new(Level::Info, Some(path.to_string_lossy().into_owned()));

        logger.log(
            &Record::builder()
                .args(format_args!("built Calculator.app"))
                .level(Level::Info)
                .target("appbundle::api")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("filtered"))
                .level(Level::Debug)
                .target("appbundle::api")
                .build(),
        );

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["@level"], "info");
        assert_eq!(value["@message"], "built Calculator.app");
    }
}
