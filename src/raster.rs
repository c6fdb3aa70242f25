//! Rasterization of stroke data into a grayscale canvas bitmap.
//!
//! Rendering is a pure function of the drawing and the fixed canvas size: the
//! full stroke list is repainted from scratch on every call, so the output
//! never accumulates artifacts from earlier frames and repeated calls over the
//! same drawing are pixel-identical.

use crate::stroke::Drawing;
use egui::{Color32, ColorImage, Pos2};

/// Pen width in canvas pixels.
pub const STROKE_WIDTH: f32 = 3.0;
/// Intensity of drawn ink (black).
pub const INK: u8 = 0;
/// Intensity of untouched canvas (white).
pub const BACKGROUND: u8 = 255;

/// Fixed-resolution grid of grayscale pixel intensities.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayBitmap {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GrayBitmap {
    /// Create a bitmap with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixel intensities.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Intensity at (x, y); out-of-bounds reads return the background.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return BACKGROUND;
        }
        self.pixels[y * self.width + x]
    }

    /// True when no pixel differs from the background.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == BACKGROUND)
    }

    /// Convert to an egui image for display as a canvas texture.
    pub fn to_color_image(&self) -> ColorImage {
        let pixels = self
            .pixels
            .iter()
            .map(|&v| Color32::from_gray(v))
            .collect();
        ColorImage::new([self.width, self.height], pixels)
    }

    fn stamp_dot(&mut self, center: Pos2, radius: f32) {
        let min_x = (center.x - radius).floor().max(0.0) as usize;
        let min_y = (center.y - radius).floor().max(0.0) as usize;
        let max_x = ((center.x + radius).ceil() as usize).min(self.width.saturating_sub(1));
        let max_y = ((center.y + radius).ceil() as usize).min(self.height.saturating_sub(1));
        if self.width == 0 || self.height == 0 {
            return;
        }
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= radius * radius {
                    self.pixels[y * self.width + x] = INK;
                }
            }
        }
    }
}

/// Renders a drawing into the fixed-size canvas bitmap.
#[derive(Clone, Debug)]
pub struct StrokeRasterizer {
    width: usize,
    height: usize,
}

impl StrokeRasterizer {
    /// Create a rasterizer for a canvas of the given pixel dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Draw every stroke as a connected polyline of fixed width with round
    /// caps and joins, solid black on white, in drawing order.
    ///
    /// A stroke with a single point renders as a dot rather than being
    /// dropped. Segments are painted by stamping overlapping pen discs along
    /// their length, which yields the round caps/joins directly.
    pub fn render(&self, drawing: &Drawing) -> GrayBitmap {
        let mut bitmap = GrayBitmap::filled(self.width, self.height, BACKGROUND);
        let radius = STROKE_WIDTH / 2.0;
        for stroke in drawing.strokes() {
            let points = stroke.points();
            bitmap.stamp_dot(points[0], radius);
            for pair in points.windows(2) {
                stamp_segment(&mut bitmap, pair[0], pair[1], radius);
            }
        }
        bitmap
    }
}

/// Stamp pen discs along the segment at sub-pixel spacing.
fn stamp_segment(bitmap: &mut GrayBitmap, from: Pos2, to: Pos2, radius: f32) {
    let delta = to - from;
    let length = delta.length();
    if length == 0.0 {
        bitmap.stamp_dot(from, radius);
        return;
    }
    let steps = (length / 0.5).ceil() as usize;
    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        bitmap.stamp_dot(from + delta * t, radius);
    }
}
