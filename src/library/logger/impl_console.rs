use crate::config::LogLevel;
use crate::library::logger::interface::{Logger, LoggerResult};
use chrono::Utc;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    timezone: chrono::FixedOffset,
    level: LogLevel,
}

impl LoggerConsole {
    pub fn new(timezone: chrono::FixedOffset, level: LogLevel) -> Self {
        Self {
            namespace: None,
            timezone,
            level,
        }
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        let local_time = Utc::now().with_timezone(&self.timezone);
        let formatted = local_time.format("%Y-%m-%d %H:%M:%S%.3f");
        let tag = match level {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        match &self.namespace {
            Some(namespace) => format!("[{}] {} {}: {}", formatted, tag, namespace, message),
            None => format!("[{}] {} {}", formatted, tag, message),
        }
    }

    fn log(&self, level: LogLevel, message: &str) -> LoggerResult {
        if level < self.level {
            return Ok(());
        }
        let line = self.format_line(level, message);
        // Warnings and errors go to stderr so the progress stream stays clean.
        if level >= LogLevel::Warn {
            writeln!(std::io::stderr().lock(), "{}", line)?;
        } else {
            writeln!(std::io::stdout().lock(), "{}", line)?;
        }
        Ok(())
    }
}

impl Logger for LoggerConsole {
    fn debug(&self, message: &str) -> LoggerResult {
        self.log(LogLevel::Debug, message)
    }

    fn info(&self, message: &str) -> LoggerResult {
        self.log(LogLevel::Info, message)
    }

    fn warn(&self, message: &str) -> LoggerResult {
        self.log(LogLevel::Warn, message)
    }

    fn error(&self, message: &str) -> LoggerResult {
        self.log(LogLevel::Error, message)
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerConsole {
            namespace: Some(new_namespace),
            timezone: self.timezone,
            level: self.level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> chrono::FixedOffset {
        chrono::FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_format_line_with_nested_namespace() {
        let logger = LoggerConsole {
            namespace: Some("pipeline:batch_walker".to_string()),
            timezone: utc(),
            level: LogLevel::Info,
        };

        let line = logger.format_line(LogLevel::Info, "First 150 images done!");

        assert!(line.starts_with('['));
        assert!(line.ends_with("] INFO pipeline:batch_walker: First 150 images done!"));
    }

    #[test]
    fn test_format_line_without_namespace() {
        let logger = LoggerConsole::new(utc(), LogLevel::Debug);

        let line = logger.format_line(LogLevel::Warn, "skipped");

        assert!(line.ends_with("] WARN skipped"));
    }

    #[test]
    fn test_below_level_is_silent() {
        let logger = LoggerConsole::new(utc(), LogLevel::Error);

        assert!(logger.info("hidden").is_ok());
        assert!(logger.debug("hidden").is_ok());
    }
}
