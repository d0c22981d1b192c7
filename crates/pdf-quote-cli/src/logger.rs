use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Writes timestamped records to stderr and counts warnings
#[derive(Clone)]
pub struct CliLogger {
    level: LevelFilter,
    warnings: Arc<AtomicUsize>,
}

impl CliLogger {
    pub fn new(verbose: bool) -> Self {
        Self {
            level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            },
            warnings: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Number of warnings logged so far
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if record.level() <= Level::Warn {
            self.warnings.fetch_add(1, Ordering::Relaxed);
        }
        if self.enabled(record.metadata()) {
            eprintln!(
                "{} {:<5} {}: {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
