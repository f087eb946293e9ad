// src/render/canvas.rs

use glam::Vec2;

use crate::core::vessel::Rect;

/// RGBA 8bit の色。
pub type Rgba = [u8; 4];

/// 2つのRGBAカラーをアルファブレンディングで合成するヘルパー関数。
pub fn blend_colors(bottom: Rgba, top: Rgba) -> Rgba {
    let top_alpha = top[3] as f32 / 255.0;
    if top_alpha == 0.0 {
        return bottom;
    }
    if top_alpha >= 1.0 {
        return top;
    }

    let bottom_alpha = bottom[3] as f32 / 255.0;
    let out_alpha = top_alpha + bottom_alpha * (1.0 - top_alpha);
    if out_alpha == 0.0 {
        return [0, 0, 0, 0];
    }

    let mix = |t: u8, b: u8| {
        ((t as f32 * top_alpha + b as f32 * bottom_alpha * (1.0 - top_alpha)) / out_alpha).round() as u8
    };

    [
        mix(top[0], bottom[0]),
        mix(top[1], bottom[1]),
        mix(top[2], bottom[2]),
        (out_alpha * 255.0).round() as u8,
    ]
}

/// `pixels` のフレームバッファ（RGBA、行優先）に図形を描くための薄いラッパー。
///
/// 座標は浮動小数点のピクセル座標。ピクセル `(px, py)` は中心 `(px + 0.5, py + 0.5)` が
/// 図形に入っていれば塗られる。画面外ははみ出した分だけ切り捨てる。
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        let width = width as usize;
        let height = height as usize;
        debug_assert!(frame.len() >= width * height * 4);
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let mut color = [0; 4];
        color.copy_from_slice(&self.frame[i..i + 4]);
        Some(color)
    }

    fn blend_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        let i = (y * self.width + x) * 4;
        let pixel = &mut self.frame[i..i + 4];
        let bottom = [pixel[0], pixel[1], pixel[2], pixel[3]];
        pixel.copy_from_slice(&blend_colors(bottom, color));
    }

    pub fn clear(&mut self, color: Rgba) {
        for pixel in self.frame.chunks_exact_mut(4).take(self.width * self.height) {
            pixel.copy_from_slice(&color);
        }
    }

    /// 画面の `y0..y1` 行をまるごと塗る（背景用、ブレンドなし）。
    pub fn fill_rows(&mut self, y0: f32, y1: f32, color: Rgba) {
        let start = (y0.max(0.0).round() as usize).min(self.height);
        let end = (y1.max(0.0).round() as usize).min(self.height);
        for row in start..end {
            let i = row * self.width * 4;
            for pixel in self.frame[i..i + self.width * 4].chunks_exact_mut(4) {
                pixel.copy_from_slice(&color);
            }
        }
    }

    /// `bbox` の中で `inside` が真になるピクセルを塗る。ほかの図形はすべてこれを使う。
    pub fn fill_where(&mut self, bbox: Rect, color: Rgba, inside: impl Fn(Vec2) -> bool) {
        if !(bbox.x.is_finite() && bbox.y.is_finite() && bbox.w.is_finite() && bbox.h.is_finite()) {
            return;
        }
        let x0 = bbox.x.floor().max(0.0) as usize;
        let y0 = bbox.y.floor().max(0.0) as usize;
        let x1 = (bbox.right().ceil().max(0.0) as usize).min(self.width);
        let y1 = (bbox.bottom().ceil().max(0.0) as usize).min(self.height);

        for py in y0..y1 {
            for px in x0..x1 {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                if inside(p) {
                    self.blend_pixel(px, py, color);
                }
            }
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.fill_where(rect, color, |p| {
            p.x >= rect.x && p.x < rect.right() && p.y >= rect.y && p.y < rect.bottom()
        });
    }

    pub fn fill_ellipse(&mut self, center: Vec2, rx: f32, ry: f32, color: Rgba) {
        self.fill_ellipse_clipped(center, rx, ry, color, |_| true);
    }

    /// `clip` も真になる部分だけ楕円を塗る。
    pub fn fill_ellipse_clipped(
        &mut self,
        center: Vec2,
        rx: f32,
        ry: f32,
        color: Rgba,
        clip: impl Fn(Vec2) -> bool,
    ) {
        if !(rx > 0.0 && ry > 0.0) {
            return;
        }
        let bbox = Rect::new(center.x - rx, center.y - ry, rx * 2.0, ry * 2.0);
        self.fill_where(bbox, color, |p| in_ellipse(p, center, rx, ry) && clip(p));
    }

    /// 太さ `thickness` の楕円の輪郭。
    pub fn stroke_ellipse(&mut self, center: Vec2, rx: f32, ry: f32, thickness: f32, color: Rgba) {
        let half = thickness / 2.0;
        let (outer_x, outer_y) = (rx + half, ry + half);
        let (inner_x, inner_y) = (rx - half, ry - half);
        if !(outer_x > 0.0 && outer_y > 0.0) {
            return;
        }
        let bbox = Rect::new(center.x - outer_x, center.y - outer_y, outer_x * 2.0, outer_y * 2.0);
        self.fill_where(bbox, color, |p| {
            in_ellipse(p, center, outer_x, outer_y)
                && (inner_x <= 0.0 || inner_y <= 0.0 || !in_ellipse(p, center, inner_x, inner_y))
        });
    }

    /// 多角形（凸でなくてもよい）を偶奇規則で塗る。
    pub fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let bbox = bounding_box(points);
        self.fill_where(bbox, color, |p| in_polygon(p, points));
    }

    /// 太さ `thickness` の線分。
    pub fn draw_line(&mut self, a: Vec2, b: Vec2, thickness: f32, color: Rgba) {
        let half = thickness / 2.0;
        let bbox = bounding_box(&[a, b]).inflate(half + 1.0, half + 1.0);
        self.fill_where(bbox, color, |p| distance_to_segment(p, a, b) <= half);
    }

    /// 閉じた折れ線。
    pub fn stroke_polygon(&mut self, points: &[Vec2], thickness: f32, color: Rgba) {
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.draw_line(a, b, thickness, color);
        }
    }
}

fn in_ellipse(p: Vec2, center: Vec2, rx: f32, ry: f32) -> bool {
    let dx = (p.x - center.x) / rx;
    let dy = (p.y - center.y) / ry;
    dx * dx + dy * dy <= 1.0
}

fn in_polygon(p: Vec2, points: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn bounding_box(points: &[Vec2]) -> Rect {
    let (mut min, mut max) = (points[0], points[0]);
    for &p in &points[1..] {
        min = min.min(p);
        max = max.max(p);
    }
    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}
