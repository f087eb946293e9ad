//! 容器の記述子と、画面上の矩形。

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::material::{MatterState, ShapeKind};

/// 容器の ID。一意で、並び替えても変わらない。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VesselId(pub u32);

impl std::fmt::Display for VesselId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// 外側が持っている容器の情報。コアは毎フレーム読むだけ。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VesselDescriptor {
  pub id: VesselId,
  pub shape: ShapeKind,
  #[serde(default)]
  pub state: MatterState,
  #[serde(default)]
  pub label: String,
}

impl VesselDescriptor {
  pub fn new(id: u32, shape: ShapeKind, state: MatterState, label: impl Into<String>) -> Self {
    Self {
      id: VesselId(id),
      shape,
      state,
      label: label.into(),
    }
  }
}

/// デモ用の三つの容器（箱・瓶・鉢）。
pub fn default_vessels() -> Vec<VesselDescriptor> {
  vec![
    VesselDescriptor::new(1, ShapeKind::Box, MatterState::Empty, "Box"),
    VesselDescriptor::new(2, ShapeKind::Jar, MatterState::Empty, "Jar"),
    VesselDescriptor::new(3, ShapeKind::Bowl, MatterState::Empty, "Bowl"),
  ]
}

/// 画面ピクセル単位の軸平行な矩形。
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
  pub x: f32,
  pub y: f32,
  pub w: f32,
  pub h: f32,
}

impl Rect {
  pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
    Self { x, y, w, h }
  }

  pub fn right(&self) -> f32 {
    self.x + self.w
  }

  pub fn bottom(&self) -> f32 {
    self.y + self.h
  }

  pub fn center(&self) -> Vec2 {
    Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
  }

  /// 四辺を `dx`, `dy` ずつ広げる。負の値なら縮める。
  pub fn inflate(&self, dx: f32, dy: f32) -> Rect {
    Rect::new(self.x - dx, self.y - dy, self.w + dx * 2.0, self.h + dy * 2.0)
  }

  /// 境界上も含む。
  pub fn contains(&self, p: Vec2) -> bool {
    p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
  }
}

/// そのフレームで計算した容器の位置。毎フレーム上書きされるよ。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VesselBounds {
  pub id: VesselId,
  pub rect: Rect,
}
