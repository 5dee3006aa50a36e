use std::sync::Arc;

pub type LoggerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub trait Logger: Send + Sync {
    fn debug(&self, message: &str) -> LoggerResult;
    fn info(&self, message: &str) -> LoggerResult;
    fn warn(&self, message: &str) -> LoggerResult;
    fn error(&self, message: &str) -> LoggerResult;
    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync>;
}
