use crate::config::{ImageLoaderConfig, ModelConfig};
use crate::error::PipelineError;
use crate::image_classifier::interface::{check_input_shape, ImageClassifier, ModelBindings, OutputVector};
use crate::image_classifier::tract::plan::{self, TractPlan};
use crate::image_loader::ImageTensor;
use crate::library::logger::interface::Logger;
use std::sync::Arc;
use tract_core::prelude::*;

pub struct ImageClassifierTractTflite {
    model: TractPlan,
    bindings: ModelBindings,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifier for ImageClassifierTractTflite {
    fn bind(
        config: &ModelConfig,
        image_loader: &ImageLoaderConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, PipelineError> {
        let logger = logger.with_namespace("image_classifier").with_namespace("tflite");
        let path = config.model_path.as_path();

        let model = tract_tflite::tflite()
            .model_for_path(path)
            .map_err(|e| plan::model_load_error(path, e))?;
        let model = plan::optimize(model, path)?;
        let bindings = plan::resolve_bindings(&model, path, &image_loader.input_shape())?;

        let _ = logger.debug(&format!(
            "Bound {}: input {} {:?}, output {} {:?}",
            path.display(),
            bindings.input.name,
            bindings.input.shape,
            bindings.output.name,
            bindings.output.shape
        ));

        Ok(Self {
            model,
            bindings,
            logger,
        })
    }

    fn bindings(&self) -> &ModelBindings {
        &self.bindings
    }

    fn score(&self, tensor: ImageTensor) -> Result<OutputVector, PipelineError> {
        check_input_shape(&self.bindings, &tensor)?;
        let output = plan::run(&self.model, &self.bindings, tensor)?;
        let _ = self.logger.debug(&format!("Output: {:?}", output));
        Ok(output)
    }
}
