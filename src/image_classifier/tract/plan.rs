use crate::error::PipelineError;
use crate::image_classifier::interface::{ModelBindings, OutputVector, TensorBinding};
use crate::image_loader::ImageTensor;
use std::path::Path;
use tract_core::prelude::*;

pub type TractPlan = TypedRunnableModel<TypedModel>;

pub fn optimize(model: TypedModel, model_path: &Path) -> Result<TractPlan, PipelineError> {
    model
        .into_optimized()
        .and_then(|model| model.into_runnable())
        .map_err(|e| model_load_error(model_path, e))
}

pub fn resolve_bindings(
    plan: &TractPlan,
    model_path: &Path,
    expected_input: &[usize],
) -> Result<ModelBindings, PipelineError> {
    let model = plan.model();

    let input = binding(model, model_path, BindingSide::Input)?;
    if input.shape != expected_input {
        return Err(PipelineError::ModelLoad {
            path: model_path.to_path_buf(),
            reason: format!(
                "input {} has shape {:?}, images are loaded as {:?}",
                input.name, input.shape, expected_input
            ),
        });
    }

    let output = binding(model, model_path, BindingSide::Output)?;
    if output.shape.iter().product::<usize>() == 0 {
        return Err(PipelineError::ModelLoad {
            path: model_path.to_path_buf(),
            reason: format!("output {} is empty", output.name),
        });
    }

    Ok(ModelBindings { input, output })
}

pub fn run(
    plan: &TractPlan,
    bindings: &ModelBindings,
    tensor: ImageTensor,
) -> Result<OutputVector, PipelineError> {
    let input = tensor.into_array().into_tensor();

    let outputs = plan
        .run(tvec!(input.into_tvalue()))
        .map_err(inference_error)?;

    let output = outputs
        .get(bindings.output.index)
        .ok_or_else(|| PipelineError::Inference {
            reason: format!("model produced no output at index {}", bindings.output.index),
        })?;

    let output = output.cast_to::<f32>().map_err(inference_error)?;
    let values = output.as_slice::<f32>().map_err(inference_error)?;

    Ok(values.to_vec())
}

enum BindingSide {
    Input,
    Output,
}

fn binding(
    model: &TypedModel,
    model_path: &Path,
    side: BindingSide,
) -> Result<TensorBinding, PipelineError> {
    let (outlets, label) = match side {
        BindingSide::Input => (model.input_outlets(), "input"),
        BindingSide::Output => (model.output_outlets(), "output"),
    };
    let outlets = outlets.map_err(|e| model_load_error(model_path, e))?;

    // Single-image binary classifiers have exactly one of each.
    let outlet = outlets.first().ok_or_else(|| PipelineError::ModelLoad {
        path: model_path.to_path_buf(),
        reason: format!("model declares no {}", label),
    })?;

    let fact = model
        .outlet_fact(*outlet)
        .map_err(|e| model_load_error(model_path, e))?;

    let shape = fact
        .shape
        .as_concrete()
        .ok_or_else(|| PipelineError::ModelLoad {
            path: model_path.to_path_buf(),
            reason: format!("{} shape {:?} is not concrete", label, fact.shape),
        })?
        .to_vec();

    Ok(TensorBinding {
        index: 0,
        name: model.node(outlet.node).name.clone(),
        shape,
    })
}

pub fn model_load_error(model_path: &Path, error: TractError) -> PipelineError {
    PipelineError::ModelLoad {
        path: model_path.to_path_buf(),
        reason: format!("{:#}", error),
    }
}

fn inference_error(error: TractError) -> PipelineError {
    PipelineError::Inference {
        reason: format!("{:#}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tract_core::ops::nn::{Reduce, Reducer};
    use tract_core::prelude::tract_ndarray::Array4;

    /// Sums every pixel of the source into a single value.
    fn summing_model(input_shape: [usize; 4]) -> TypedModel {
        let mut model = TypedModel::default();
        let source = model.add_source("input", f32::fact(input_shape)).unwrap();
        let sum = model
            .wire_node("mean", Reduce::new(tvec![1, 2, 3], Reducer::Sum), &[source])
            .unwrap();
        model.set_output_outlets(&sum).unwrap();
        model
    }

    fn model_path() -> PathBuf {
        PathBuf::from("tiny")
    }

    #[test]
    fn test_bindings_of_channel_last_model() {
        let plan = optimize(summing_model([1, 224, 224, 3]), &model_path()).unwrap();

        let bindings = resolve_bindings(&plan, &model_path(), &[1, 224, 224, 3]).unwrap();

        assert_eq!(bindings.input.name, "input");
        assert_eq!(bindings.input.shape, vec![1, 224, 224, 3]);
        assert_eq!(bindings.output.shape, vec![1, 1, 1, 1]);
        assert_eq!(bindings.output_len(), 1);
    }

    #[test]
    fn test_run_returns_one_value_per_output_element() {
        let plan = optimize(summing_model([1, 224, 224, 3]), &model_path()).unwrap();
        let bindings = resolve_bindings(&plan, &model_path(), &[1, 224, 224, 3]).unwrap();

        let zeros = ImageTensor::from_array(Array4::zeros((1, 224, 224, 3)));
        let output = run(&plan, &bindings, zeros).unwrap();
        assert_eq!(output.len(), bindings.output_len());
        assert_eq!(output[0], 0.0);

        let ones = ImageTensor::from_array(Array4::ones((1, 224, 224, 3)));
        let output = run(&plan, &bindings, ones).unwrap();
        assert_eq!(output.len(), bindings.output_len());
        assert!((output[0] - (224.0 * 224.0 * 3.0)).abs() < 1.0);
    }

    #[test]
    fn test_channel_first_model_is_rejected() {
        let plan = optimize(summing_model([1, 3, 224, 224]), &model_path()).unwrap();

        let result = resolve_bindings(&plan, &model_path(), &[1, 224, 224, 3]);

        match result {
            Err(PipelineError::ModelLoad { path, reason }) => {
                assert_eq!(path, model_path());
                assert!(reason.contains("[1, 3, 224, 224]"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
