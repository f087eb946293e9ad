// 背景と、容器の足もとの影・光彩

use glam::Vec2;

use crate::render::canvas::Canvas;
use crate::render::colors;
use crate::render::geometry::VesselGeometry;

const SHADOW_SQUASH: f32 = 0.12;
/// 選択中の光彩は影よりひと回り大きい。
const GLOW_SCALE: f32 = 1.35;

/// 空と地面の二色の背景。`horizon` より上が空。
pub fn draw_background(canvas: &mut Canvas, horizon: f32) {
    let height = canvas.height() as f32;
    canvas.fill_rows(0.0, horizon, colors::SKY);
    canvas.fill_rows(horizon, height, colors::GROUND);
}

/// 容器の下に影を描く。選択中の容器は影のかわりに光彩。
pub fn draw_ground_mark(canvas: &mut Canvas, geometry: &VesselGeometry, selected: bool) {
    let (foot, half_width) = geometry.footprint();
    let (rx, color) = if selected {
        (half_width * GLOW_SCALE, colors::GLOW)
    } else {
        (half_width * 1.05, colors::SHADOW)
    };
    let ry = (rx * SHADOW_SQUASH).max(4.0);
    canvas.fill_ellipse(foot + Vec2::new(0.0, ry * 0.3), rx, ry, color);
}
