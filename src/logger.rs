// src/logger.rs
//! ファイルに書くロガーだよ！📝
//!
//! 画面はゲームが使っているので、ログは `klondike.log` に書き出す。
//! レベルは環境変数 `KLONDIKE_LOG` (error / warn / info / debug / trace) で決める。

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

pub const LOG_FILE: &str = "klondike.log";
pub const LOG_LEVEL_ENV: &str = "KLONDIKE_LOG";

pub struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    /// 追記モードでファイルを開く。
    pub fn open(path: impl AsRef<Path>, level: LevelFilter) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { level, file: Mutex::new(file) })
    }

    fn level_prefix(level: Level) -> &'static str {
        match level {
            Level::Error => "[ERROR]",
            Level::Warn => "[WARN] ",
            Level::Info => "[INFO] ",
            Level::Debug => "[DEBUG]",
            Level::Trace => "[TRACE]",
        }
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        let _ = writeln!(
            file,
            "{} [{}] {}",
            Self::level_prefix(record.level()),
            record.module_path().unwrap_or("?"),
            record.args()
        );
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// 環境変数の値をレベルに。読めなければ Info。
pub fn level_from_env(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|value| LevelFilter::from_str(value.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// ロガーを登録する。ファイルが開けなければログは出さない。
pub fn init() -> Result<(), SetLoggerError> {
    let level = level_from_env(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    match FileLogger::open(LOG_FILE, level) {
        Ok(logger) => {
            log::set_boxed_logger(Box::new(logger))?;
            log::set_max_level(level);
        }
        Err(_) => log::set_max_level(LevelFilter::Off),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing() {
        assert_eq!(level_from_env(None), LevelFilter::Info);
        assert_eq!(level_from_env(Some("debug")), LevelFilter::Debug);
        assert_eq!(level_from_env(Some(" WARN ")), LevelFilter::Warn);
        assert_eq!(level_from_env(Some("loud")), LevelFilter::Info);
    }

    #[test]
    fn writes_enabled_records_only() {
        let path = std::env::temp_dir().join(format!("klondike-{}-test.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let logger = FileLogger::open(&path, LevelFilter::Warn).unwrap();

        logger.log(&Record::builder().level(Level::Info).args(format_args!("quiet")).build());
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .module_path(Some("klondike_console::game"))
                .args(format_args!("loud"))
                .build(),
        );
        logger.flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "[ERROR] [klondike_console::game] loud\n");
        let _ = std::fs::remove_file(&path);
    }
}
