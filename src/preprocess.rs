//! Conversion of the canvas bitmap into the classifier's input tensor.
//!
//! The canvas draws black ink on a white background; the models this app
//! targets were trained on MNIST-style data where ink is the high value. So
//! normalization downsamples, inverts and scales in one pass: background maps
//! to 0.0 and full ink to 1.0.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use ndarray::Array3;

use crate::classifier::TensorShape;
use crate::raster::GrayBitmap;

/// Resize the canvas bitmap to `shape` and scale intensities into [0, 1].
///
/// Downsampling uses bilinear (`Triangle`) filtering, fixed so the same
/// bitmap always yields the same tensor. An all-background bitmap is valid
/// input and produces an all-zero tensor. Grayscale intensity is replicated
/// across channels when the model expects more than one.
pub fn normalize(bitmap: &GrayBitmap, shape: TensorShape) -> Array3<f32> {
    let source = GrayImage::from_fn(bitmap.width() as u32, bitmap.height() as u32, |x, y| {
        Luma([bitmap.get(x as usize, y as usize)])
    });
    let resized = imageops::resize(
        &source,
        shape.width as u32,
        shape.height as u32,
        FilterType::Triangle,
    );

    let mut tensor = Array3::<f32>::zeros((shape.height, shape.width, shape.channels));
    for (x, y, pixel) in resized.enumerate_pixels() {
        let intensity = (255 - pixel.0[0]) as f32 / 255.0;
        for c in 0..shape.channels {
            tensor[[y as usize, x as usize, c]] = intensity;
        }
    }
    tensor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::MNIST_INPUT;
    use crate::raster::{BACKGROUND, StrokeRasterizer};
    use crate::stroke::StrokeRecorder;
    use egui::pos2;

    #[test]
    fn output_shape_matches_contract_regardless_of_input() {
        let bitmap = GrayBitmap::filled(280, 280, BACKGROUND);
        let tensor = normalize(&bitmap, MNIST_INPUT);
        assert_eq!(tensor.dim(), (28, 28, 1));
    }

    #[test]
    fn empty_bitmap_yields_all_zero_tensor() {
        let bitmap = GrayBitmap::filled(280, 280, BACKGROUND);
        let tensor = normalize(&bitmap, MNIST_INPUT);
        assert!(tensor.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn normalize_is_deterministic() {
        let rasterizer = StrokeRasterizer::new(280, 280);
        let mut recorder = StrokeRecorder::default();
        recorder.begin_stroke(pos2(100.0, 60.0));
        recorder.extend_stroke(pos2(150.0, 220.0));
        recorder.end_stroke();
        let bitmap = rasterizer.render(recorder.drawing());
        let first = normalize(&bitmap, MNIST_INPUT);
        let second = normalize(&bitmap, MNIST_INPUT);
        assert_eq!(first, second);
    }

    #[test]
    fn single_dot_survives_downsampling() {
        let rasterizer = StrokeRasterizer::new(280, 280);
        let mut recorder = StrokeRecorder::default();
        recorder.begin_stroke(pos2(140.0, 140.0));
        recorder.end_stroke();
        let bitmap = rasterizer.render(recorder.drawing());
        assert!(!bitmap.is_blank());

        let tensor = normalize(&bitmap, MNIST_INPUT);
        assert!(tensor.iter().any(|&v| v > 0.0));
        // The mark lands near the center of the downsampled grid.
        let center = tensor
            .slice(ndarray::s![12..16, 12..16, 0])
            .iter()
            .copied()
            .fold(0.0f32, f32::max);
        assert!(center > 0.0);
    }

    #[test]
    fn values_stay_within_unit_range() {
        let bitmap = GrayBitmap::filled(56, 56, 0);
        let tensor = normalize(&bitmap, MNIST_INPUT);
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!(tensor.iter().any(|&v| v == 1.0));
    }
}
