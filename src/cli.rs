use crate::config::{Backend, Config, FailurePolicy, LogLevel};
use clap::{Parser, ValueEnum};
use image::imageops::FilterType;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Iphone detector")]
pub struct Args {
    /// Path to model.
    #[arg(long, default_value = "converted_model_mi.tflite")]
    pub model: PathBuf,

    /// Path to folder with pictures.
    #[arg(long, default_value = "test")]
    pub input: PathBuf,

    /// Path to file with model output.
    #[arg(long, default_value = "predictions.csv")]
    pub output: PathBuf,

    /// Inference backend. "auto" picks from the model file extension.
    #[arg(long, value_enum, default_value_t = Backend::Auto)]
    pub backend: Backend,

    /// Log a progress line every N images. 0 disables it.
    #[arg(long, default_value_t = 150)]
    pub progress_interval: usize,

    /// Output element holding the positive class probability.
    #[arg(long, default_value_t = 0)]
    pub positive_class_index: usize,

    /// What to do with an image that cannot be decoded or scored.
    #[arg(long, value_enum, default_value_t = FailurePolicy::Skip)]
    pub on_error: FailurePolicy,

    /// Walk directories in file name order.
    #[arg(long, default_value_t = false)]
    pub sort: bool,

    /// Descend into symlinked directories.
    #[arg(long, default_value_t = false)]
    pub follow_links: bool,

    #[arg(long, value_enum, default_value_t = ResizeFilter::Nearest)]
    pub resize_filter: ResizeFilter,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        let mut config = Config::default();

        config.input_dir = args.input.clone();
        config.model.model_path = args.model.clone();
        config.model.backend = args.backend;
        config.model.positive_class_index = args.positive_class_index;
        config.image_loader.filter = args.resize_filter.into();
        config.walker.progress_interval = args.progress_interval;
        config.walker.failure_policy = args.on_error;
        config.walker.sort_entries = args.sort;
        config.walker.follow_links = args.follow_links;
        config.output.output_path = args.output.clone();
        config.log_level = args.log_level;

        config
    }
}
