use clap::ValueEnum;
use image::imageops::FilterType;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Picked from the model file extension.
    Auto,
    Tflite,
    Onnx,
    Fake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailurePolicy {
    Skip,
    Abort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model_path: PathBuf,
    pub backend: Backend,
    pub positive_class_index: usize,
}

impl ModelConfig {
    pub fn resolved_backend(&self) -> Backend {
        match self.backend {
            Backend::Auto => match self.model_path.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("onnx") => Backend::Onnx,
                _ => Backend::Tflite,
            },
            backend => backend,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageLoaderConfig {
    pub width: u32,
    pub height: u32,
    pub filter: FilterType,
}

impl ImageLoaderConfig {
    pub fn input_shape(&self) -> [usize; 4] {
        [1, self.height as usize, self.width as usize, 3]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalkerConfig {
    /// Zero turns progress notifications off.
    pub progress_interval: usize,
    pub failure_policy: FailurePolicy,
    pub sort_entries: bool,
    /// Descend into symlinked directories. Symlinked files are scored either way.
    pub follow_links: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub output_path: PathBuf,
    pub name_column: String,
    pub probability_column: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input_dir: PathBuf,
    pub model: ModelConfig,
    pub image_loader: ImageLoaderConfig,
    pub walker: WalkerConfig,
    pub output: OutputConfig,
    pub log_level: LogLevel,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("test"),
            model: ModelConfig {
                model_path: PathBuf::from("converted_model_mi.tflite"),
                backend: Backend::Auto,
                positive_class_index: 0,
            },
            image_loader: ImageLoaderConfig {
                width: 224,
                height: 224,
                filter: FilterType::Nearest,
            },
            walker: WalkerConfig {
                progress_interval: 150,
                failure_policy: FailurePolicy::Skip,
                sort_entries: false,
                follow_links: false,
            },
            output: OutputConfig {
                output_path: PathBuf::from("predictions.csv"),
                name_column: "image_name".to_string(),
                probability_column: "iphone_probability".to_string(),
            },
            log_level: LogLevel::Info,
            logger_timezone: utc(),
        }
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::FixedOffset::east_opt(0).unwrap()
}
