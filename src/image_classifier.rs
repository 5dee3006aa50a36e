pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod impl_tract_tflite;
pub mod interface;
pub mod tract;


use crate::config::{Backend, ImageLoaderConfig, ModelConfig};
use crate::error::PipelineError;
use crate::library::logger::interface::Logger;
use impl_fake::ImageClassifierFake;
use impl_tract_onnx::ImageClassifierTractOnnx;
use impl_tract_tflite::ImageClassifierTractTflite;
use interface::ImageClassifier;
use std::sync::Arc;

pub fn bind_classifier(
    model: &ModelConfig,
    image_loader: &ImageLoaderConfig,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<Arc<dyn ImageClassifier + Send + Sync>, PipelineError> {
    let classifier: Arc<dyn ImageClassifier + Send + Sync> = match model.resolved_backend() {
        Backend::Onnx => Arc::new(ImageClassifierTractOnnx::bind(model, image_loader, logger)?),
        Backend::Fake => Arc::new(ImageClassifierFake::bind(model, image_loader, logger)?),
        Backend::Tflite | Backend::Auto => {
            Arc::new(ImageClassifierTractTflite::bind(model, image_loader, logger)?)
        }
    };

    if model.positive_class_index >= classifier.bindings().output_len() {
        return Err(PipelineError::ModelLoad {
            path: model.model_path.clone(),
            reason: format!(
                "positive class index {} is outside output {} of shape {:?}",
                model.positive_class_index,
                classifier.bindings().output.name,
                classifier.bindings().output.shape
            ),
        });
    }

    Ok(classifier)
}
