//! Rendering module
//!
//! Frame composition over a narrow 2D raster trait. The browser canvas
//! implementation lives behind the wasm target gate; tests drive the same
//! scene code through a recording surface.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{RenderOptions, draw_frame};
pub use surface::{DrawSurface, Scale};
