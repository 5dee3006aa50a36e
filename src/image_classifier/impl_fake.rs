use crate::config::{ImageLoaderConfig, ModelConfig};
use crate::error::PipelineError;
use crate::image_classifier::interface::{
    check_input_shape, ImageClassifier, ModelBindings, OutputVector, TensorBinding,
};
use crate::image_loader::ImageTensor;
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

type ScoreRule = Box<dyn Fn(&ImageTensor) -> OutputVector + Send + Sync>;

/// Scores images without a model. The default rule seeds an RNG from the pixel
/// data, so the same image always gets the same probability.
pub struct ImageClassifierFake {
    bindings: ModelBindings,
    rule: ScoreRule,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierFake {
    pub fn new(image_loader: &ImageLoaderConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_rule(image_loader, logger, seeded_probability)
    }

    pub fn with_rule(
        image_loader: &ImageLoaderConfig,
        logger: Arc<dyn Logger + Send + Sync>,
        rule: impl Fn(&ImageTensor) -> OutputVector + Send + Sync + 'static,
    ) -> Self {
        Self {
            bindings: ModelBindings {
                input: TensorBinding {
                    index: 0,
                    name: "fake_input".to_string(),
                    shape: image_loader.input_shape().to_vec(),
                },
                output: TensorBinding {
                    index: 0,
                    name: "fake_output".to_string(),
                    shape: vec![1, 1],
                },
            },
            rule: Box::new(rule),
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn bind(
        _config: &ModelConfig,
        image_loader: &ImageLoaderConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, PipelineError> {
        Ok(Self::new(image_loader, logger))
    }

    fn bindings(&self) -> &ModelBindings {
        &self.bindings
    }

    fn score(&self, tensor: ImageTensor) -> Result<OutputVector, PipelineError> {
        check_input_shape(&self.bindings, &tensor)?;
        let _ = self.logger.debug("Scoring image with fake classifier...");
        Ok((self.rule)(&tensor))
    }
}

fn seeded_probability(tensor: &ImageTensor) -> OutputVector {
    let seed = tensor
        .as_array()
        .iter()
        .fold(0xcbf2_9ce4_8422_2325_u64, |hash, value| {
            (hash ^ u64::from(value.to_bits())).wrapping_mul(0x0100_0000_01b3)
        });

    let mut rng = StdRng::seed_from_u64(seed);
    match Uniform::new(0.0_f32, 1.0) {
        Ok(dist) => vec![dist.sample(&mut rng)],
        Err(_) => vec![0.0],
    }
}
