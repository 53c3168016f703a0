//! Log sink for the terminal app.
//!
//! The alternate screen owns stdout, so records go to a file instead.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    /// Open (appending) or create the log file, creating parent directories.
    pub fn open(path: &Path, level: LevelFilter) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            level,
            file: Mutex::new(file),
        })
    }

    /// Install as the global logger.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
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
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "{} {:<5} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use tempfile::tempdir;

    fn record_at(logger: &FileLogger, level: Level, msg: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("campustype::game")
                .args(format_args!("{msg}"))
                .build(),
        );
        logger.flush();
    }

    #[test]
    fn writes_records_at_or_above_level() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("campustype.log");
        let logger = FileLogger::open(&path, LevelFilter::Info).unwrap();

        record_at(&logger, Level::Info, "round started");
        record_at(&logger, Level::Debug, "too chatty");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("INFO  campustype::game: round started"));
        assert!(!contents.contains("too chatty"));
    }

    #[test]
    fn appends_to_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("campustype.log");
        fs::write(&path, "earlier\n").unwrap();

        let logger = FileLogger::open(&path, LevelFilter::Trace).unwrap();
        record_at(&logger, Level::Trace, "later");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier\n"));
        assert!(contents.contains("later"));
    }
}
