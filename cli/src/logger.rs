//! Minimal `log` backend: styled, level-tagged lines on stderr.

use console::Style;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    fn style(level: Level) -> Style {
        match level {
            Level::Error => Style::new().red().bold(),
            Level::Warn => Style::new().yellow(),
            Level::Info => Style::new().cyan(),
            Level::Debug | Level::Trace => Style::new().dim(),
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = Self::style(record.level()).apply_to(format!("{:<5}", record.level()));
        eprintln!("{} {}", tag, record.args());
    }

    fn flush(&self) {}
}

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger { level }))?;
    log::set_max_level(level);
    Ok(())
}
