//! 容器の形の計算。枠（正方形）から、輪郭と中身が入る領域の座標を出す。
//!
//! ここは純粋な計算だけで、描画も状態の更新もしない。

use glam::Vec2;

use crate::config::LayoutConfig;
use crate::core::material::ShapeKind;
use crate::core::vessel::Rect;
use crate::physics::Confinement;

/// 壁の厚み。中身はこの分だけ内側に入る。
pub const WALL: f32 = 3.0;

/// 箱の奥行き（幅に対する割合）。
const BOX_DEPTH: f32 = 0.3;
/// 瓶の胴の幅（枠の幅に対する割合）。
const JAR_BODY: f32 = 0.7;
/// 瓶の口と底の楕円のつぶれ具合（縦半径 / 横半径）。
const JAR_RIM_SQUASH: f32 = 0.3;
const BOWL_OPENING: f32 = 0.6;
const BOWL_OPENING_SQUASH: f32 = 0.25;

/// 上が開いた四角い水槽。斜投影で、奥の矩形が右上にずれている。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxGeometry {
    pub front: Rect,
    pub back: Rect,
    pub depth: f32,
    pub interior: Rect,
}

impl BoxGeometry {
    pub fn new(rect: Rect) -> Self {
        let depth = rect.w * BOX_DEPTH;
        let front = Rect::new(rect.x, rect.y + depth, rect.w - depth, rect.h - depth);
        let back = Rect::new(rect.x + depth, rect.y, rect.w - depth, rect.h - depth);
        Self {
            front,
            back,
            depth,
            interior: front.inflate(-WALL, -WALL),
        }
    }

    /// 奥方向へのずれ（右上）。
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.depth, -self.depth)
    }
}

/// 縦長の円柱。口と底の楕円を左右の壁でつなぐ。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JarGeometry {
    pub top: Vec2,
    pub bottom: Vec2,
    pub rx: f32,
    pub ry: f32,
    pub interior: Rect,
}

impl JarGeometry {
    /// `stretch` 倍だけ背を高くする。底の位置は変えない。
    pub fn new(rect: Rect, stretch: f32) -> Self {
        let height = rect.h * stretch;
        let y = rect.bottom() - height;
        let body_w = rect.w * JAR_BODY;
        let cx = rect.x + rect.w / 2.0;
        let rx = body_w / 2.0;
        let ry = rx * JAR_RIM_SQUASH;
        let top = Vec2::new(cx, y + ry);
        let bottom = Vec2::new(cx, y + height - ry);
        let interior = Rect::new(
            cx - rx + WALL,
            top.y,
            body_w - WALL * 2.0,
            bottom.y - top.y,
        );
        Self {
            top,
            bottom,
            rx,
            ry,
            interior,
        }
    }

    pub fn left(&self) -> f32 {
        self.top.x - self.rx
    }

    pub fn right(&self) -> f32 {
        self.top.x + self.rx
    }
}

/// 球形の鉢。上のほうに小さな楕円の口がある。中身は球全体（円板）に入る。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BowlGeometry {
    pub center: Vec2,
    pub radius: f32,
    pub opening: Vec2,
    pub opening_rx: f32,
    pub opening_ry: f32,
    pub interior_radius: f32,
}

impl BowlGeometry {
    pub fn new(rect: Rect) -> Self {
        let center = rect.center();
        let radius = rect.w.min(rect.h) / 2.0;
        let opening_rx = radius * BOWL_OPENING;
        // 口の幅が球の弦の長さに一致する高さに置く
        let rise = (radius * radius - opening_rx * opening_rx).sqrt();
        Self {
            center,
            radius,
            opening: Vec2::new(center.x, center.y - rise),
            opening_rx,
            opening_ry: opening_rx * BOWL_OPENING_SQUASH,
            interior_radius: (radius - WALL).max(0.0),
        }
    }

    /// 水面の高さ（y 座標）。`fill` が 0 なら球の底、1 なら球のてっぺん。
    pub fn fill_plane(&self, fill: f32) -> f32 {
        fill_plane(self.center, self.interior_radius, fill)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VesselGeometry {
    Box(BoxGeometry),
    Jar(JarGeometry),
    Bowl(BowlGeometry),
}

impl VesselGeometry {
    /// 形が不明なら `None`。
    pub fn build(shape: ShapeKind, rect: Rect, layout: &LayoutConfig) -> Option<Self> {
        match shape {
            ShapeKind::Box => Some(VesselGeometry::Box(BoxGeometry::new(rect))),
            ShapeKind::Jar => Some(VesselGeometry::Jar(JarGeometry::new(rect, layout.jar_stretch))),
            ShapeKind::Bowl => Some(VesselGeometry::Bowl(BowlGeometry::new(rect))),
            ShapeKind::Unknown => None,
        }
    }

    /// 気体の粒子が動ける領域。
    pub fn confinement(&self) -> Confinement {
        match self {
            VesselGeometry::Box(g) => Confinement::Rect(g.interior),
            VesselGeometry::Jar(g) => Confinement::Rect(g.interior),
            VesselGeometry::Bowl(g) => Confinement::Circle {
                center: g.center,
                radius: g.interior_radius,
            },
        }
    }

    /// 影を落とす位置（接地点の中心）と、影の横半径の基準。
    pub fn footprint(&self) -> (Vec2, f32) {
        match self {
            VesselGeometry::Box(g) => (
                Vec2::new(g.front.center().x + g.depth / 2.0, g.front.bottom() - g.depth / 2.0),
                (g.front.w + g.depth) / 2.0,
            ),
            VesselGeometry::Jar(g) => (g.bottom + Vec2::new(0.0, g.ry), g.rx),
            VesselGeometry::Bowl(g) => (g.center + Vec2::new(0.0, g.radius), g.radius * 0.8),
        }
    }
}

/// 箱・瓶の液体部分。内側の矩形の底から `fill` の割合の高さ。
pub fn liquid_rect(interior: Rect, fill: f32) -> Rect {
    let height = interior.h * fill.clamp(0.0, 1.0);
    Rect::new(interior.x, interior.bottom() - height, interior.w, height)
}

/// 球の水面の y 座標: `center.y + r - 2r * fill`。
pub fn fill_plane(center: Vec2, radius: f32, fill: f32) -> f32 {
    center.y + radius - 2.0 * radius * fill
}

/// 水面の楕円の横半径 `sqrt(r² - d²)`。`d` は球の中心から水面までの距離。
///
/// 水面が球の外（`d > r`）や計算が NaN になるときは `None`。そのときは水面を描かない。
pub fn surface_half_width(center: Vec2, radius: f32, plane_y: f32) -> Option<f32> {
    let d = (plane_y - center.y).abs();
    if !(d <= radius) {
        return None;
    }
    let half_width = (radius * radius - d * d).sqrt();
    if half_width.is_nan() || half_width < 0.0 {
        return None;
    }
    Some(half_width)
}
