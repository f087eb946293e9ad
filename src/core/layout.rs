//! src/core/layout.rs

use crate::config::LayoutConfig;
use crate::core::vessel::{Rect, VesselBounds, VesselDescriptor};

/// 容器の枠のうち地平線より下に沈める割合。影が地面に落ちるようにするよ。
const SINK_INTO_GROUND: f32 = 0.25;

/// 地平線（空と地面の境目）の y 座標。
pub fn horizon_y(viewport_height: u32, layout: &LayoutConfig) -> f32 {
  viewport_height as f32 * layout.horizon
}

/// ビューポートの大きさと容器の並びから、各容器の枠を計算する。
///
/// 容器は同じ大きさの正方形で、左から右へ等間隔に並び、全体が横方向の中央に来る。
/// 戻り値は `descriptors` と同じ順番。
pub fn compute_bounds(
  viewport: (u32, u32),
  descriptors: &[VesselDescriptor],
  layout: &LayoutConfig,
) -> Vec<VesselBounds> {
  let count = descriptors.len();
  if count == 0 {
    return Vec::new();
  }

  let size = layout.vessel_size;
  let total_width = count as f32 * size + (count - 1) as f32 * layout.gap;
  let start_x = (viewport.0 as f32 - total_width) / 2.0;
  let y = horizon_y(viewport.1, layout) - size * (1.0 - SINK_INTO_GROUND);

  descriptors
    .iter()
    .enumerate()
    .map(|(i, desc)| VesselBounds {
      id: desc.id,
      rect: Rect::new(start_x + i as f32 * (size + layout.gap), y, size, size),
    })
    .collect()
}
