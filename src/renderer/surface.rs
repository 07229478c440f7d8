//! The drawing-surface contract and the display scale factor
//!
//! The simulation runs in a fixed 800x400 reference space; a `Scale` maps
//! it onto whatever canvas the host actually provides.

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Uniform multiplier from reference coordinates to device pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub factor: f32,
}

impl Scale {
    pub const IDENTITY: Scale = Scale { factor: 1.0 };

    /// Smaller of the two axis ratios, so gameplay proportions survive any
    /// window shape. Recomputed on every resize.
    pub fn from_canvas(width: f32, height: f32) -> Self {
        let factor = (width / PLAYFIELD_WIDTH).min(height / PLAYFIELD_HEIGHT);
        Self { factor }
    }

    /// Map a reference-space value to device pixels
    #[inline]
    pub fn px(&self, v: f32) -> f32 {
        v * self.factor
    }
}

/// The 2D raster surface the renderer draws through
///
/// Implemented by the browser canvas on wasm and by a recording surface in
/// tests. Colors are CSS color strings, the native currency of the canvas.
pub trait DrawSurface {
    /// Current surface size in device pixels
    fn size(&self) -> (f32, f32);
    /// Clear the whole surface
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str);
    /// Draw text at the given px size; `centered` centers horizontally on x
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size_px: f32, color: &str, centered: bool);
    /// Enable a glow (shadow blur) for subsequent fills
    fn set_glow(&mut self, color: &str, blur: f32);
    fn clear_glow(&mut self);
}
