use crate::config::LogLevel;
use crate::library::logger::interface::{Logger, LoggerResult};
use std::sync::{Arc, Mutex};

/// Records every line instead of printing it.
#[derive(Debug, Clone, Default)]
pub struct LoggerFake {
    namespace: Option<String>,
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl LoggerFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }

    fn record(&self, level: LogLevel, message: &str) -> LoggerResult {
        let line = match &self.namespace {
            Some(namespace) => format!("{}: {}", namespace, message),
            None => message.to_string(),
        };
        self.lines.lock().unwrap().push((level, line));
        Ok(())
    }
}

impl Logger for LoggerFake {
    fn debug(&self, message: &str) -> LoggerResult {
        self.record(LogLevel::Debug, message)
    }

    fn info(&self, message: &str) -> LoggerResult {
        self.record(LogLevel::Info, message)
    }

    fn warn(&self, message: &str) -> LoggerResult {
        self.record(LogLevel::Warn, message)
    }

    fn error(&self, message: &str) -> LoggerResult {
        self.record(LogLevel::Error, message)
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerFake {
            namespace: Some(new_namespace),
            lines: self.lines.clone(),
        })
    }
}
