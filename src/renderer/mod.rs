//! Rendering module
//!
//! The simulation emits `DrawCommand`s into a `Surface`. The browser backend
//! replays them onto a 2D canvas; tests and the native build record them.

pub mod draw;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use draw::{CircleStyle, DrawCommand, DrawList, Rect, SpriteSheet, Surface, TextAlign};
