// src/render.rs
//
// CPU 側の描画。`pixels` のフレームバッファに直接書き込む。

pub mod canvas;
pub mod colors;
pub mod contents;
pub mod geometry;
pub mod scene;

pub use canvas::{blend_colors, Canvas, Rgba};
pub use contents::{draw_vessel, Contents};
pub use geometry::VesselGeometry;
