use app::App;
use batch_walker::main::BatchReport;
use clap::Parser;
use cli::Args;
use config::Config;
use error::PipelineError;
use image_classifier::bind_classifier;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::process::ExitCode;
use std::sync::Arc;

mod app;
mod batch_walker;
mod cli;
mod config;
mod error;
mod image_classifier;
mod image_loader;
mod library;
mod result_aggregator;

fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config::from(&args);

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(
        config.logger_timezone,
        config.log_level,
    ));

    let _ = logger.info(&format!(
        "model = {} input_data = {} output_data = {}",
        config.model.model_path.display(),
        config.input_dir.display(),
        config.output.output_path.display()
    ));

    match run(config, logger.clone()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = logger.error(&error.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config, logger: Arc<dyn Logger + Send + Sync>) -> Result<BatchReport, PipelineError> {
    let image_classifier = bind_classifier(&config.model, &config.image_loader, logger.clone())?;

    let app = App::new(config, logger, image_classifier);

    app.start()
}
