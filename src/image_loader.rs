use crate::config::ImageLoaderConfig;
use crate::error::PipelineError;
use image::{DynamicImage, ImageReader};
use std::path::Path;
use tract_core::prelude::tract_ndarray::Array4;

/// NHWC batch of one image, values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor(Array4<f32>);

impl ImageTensor {
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    pub fn as_array(&self) -> &Array4<f32> {
        &self.0
    }

    pub fn into_array(self) -> Array4<f32> {
        self.0
    }
}

#[cfg(test)]
impl ImageTensor {
    pub fn from_array(array: Array4<f32>) -> Self {
        Self(array)
    }

    pub fn mean(&self) -> f32 {
        self.0.mean().unwrap_or(0.0)
    }
}

pub fn load_image(path: &Path, config: &ImageLoaderConfig) -> Result<ImageTensor, PipelineError> {
    let decode_error = |source: image::ImageError| PipelineError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_error)?;

    Ok(image_to_tensor(&image, config))
}

pub fn image_to_tensor(image: &DynamicImage, config: &ImageLoaderConfig) -> ImageTensor {
    let resized = image.resize_exact(config.width, config.height, config.filter);
    let rgb = resized.to_rgb8();

    let array = Array4::from_shape_fn(
        (1, config.height as usize, config.width as usize, 3),
        |(_, y, x, c)| {
            let pixel = rgb.get_pixel(x as u32, y as u32);
            pixel[c] as f32 / 255.0
        },
    );

    ImageTensor(array)
}
