use crate::config::{ImageLoaderConfig, ModelConfig};
use crate::error::PipelineError;
use crate::image_loader::ImageTensor;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

/// Raw classifier output for one image, flattened.
pub type OutputVector = Vec<f32>;

#[derive(Debug, Clone, PartialEq)]
pub struct TensorBinding {
    pub index: usize,
    pub name: String,
    pub shape: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelBindings {
    pub input: TensorBinding,
    pub output: TensorBinding,
}

impl ModelBindings {
    pub fn output_len(&self) -> usize {
        self.output.shape.iter().product()
    }
}

pub trait ImageClassifier: Send + Sync {
    /// Loads the model artifact once and resolves its input and output bindings.
    fn bind(
        model: &ModelConfig,
        image_loader: &ImageLoaderConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, PipelineError>
    where
        Self: Sized;

    fn bindings(&self) -> &ModelBindings;

    /// Runs exactly one inference pass for one image.
    fn score(&self, tensor: ImageTensor) -> Result<OutputVector, PipelineError>;
}

pub fn check_input_shape(bindings: &ModelBindings, tensor: &ImageTensor) -> Result<(), PipelineError> {
    if tensor.shape() != bindings.input.shape.as_slice() {
        return Err(PipelineError::Inference {
            reason: format!(
                "input {} expects shape {:?}, got {:?}",
                bindings.input.name,
                bindings.input.shape,
                tensor.shape()
            ),
        });
    }
    Ok(())
}
