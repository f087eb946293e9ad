// 容器ごとの輪郭と中身（固体・液体・気体）の描画

use glam::Vec2;

use crate::core::material::MatterState;
use crate::core::vessel::Rect;
use crate::physics::Particle;
use crate::render::canvas::Canvas;
use crate::render::colors::{self, darker, lighter};
use crate::render::geometry::{
    fill_plane, liquid_rect, surface_half_width, BowlGeometry, BoxGeometry, JarGeometry,
    VesselGeometry, WALL,
};

const EDGE: f32 = 2.0;

/// 岩の形（単位正方形の中の座標。y は下向き、1.0 が床）。
const ROCK_OUTLINE: [(f32, f32); 7] = [
    (0.00, 1.00),
    (0.08, 0.55),
    (0.35, 0.18),
    (0.70, 0.10),
    (0.95, 0.42),
    (1.00, 0.85),
    (0.85, 1.00),
];
/// 岩の明るい面。
const ROCK_FACET: [(f32, f32); 4] = [(0.35, 0.18), (0.70, 0.10), (0.62, 0.52), (0.30, 0.60)];

/// 描画に必要な、その容器のそのフレームの状態。
pub struct Contents<'a> {
    pub state: MatterState,
    pub fill: f32,
    pub particles: &'a [Particle],
}

/// 容器一つを描く（影や光彩は別）。奥の壁 → 中身 → 手前の壁の順に重ねる。
pub fn draw_vessel(canvas: &mut Canvas, geometry: &VesselGeometry, contents: &Contents) {
    match geometry {
        VesselGeometry::Box(g) => draw_box(canvas, g, contents),
        VesselGeometry::Jar(g) => draw_jar(canvas, g, contents),
        VesselGeometry::Bowl(g) => draw_bowl(canvas, g, contents),
    }
}

fn draw_box(canvas: &mut Canvas, g: &BoxGeometry, contents: &Contents) {
    let off = g.offset();
    let f = g.front;
    let b = g.back;

    // 床と奥の壁
    let floor = [
        Vec2::new(f.x, f.bottom()),
        Vec2::new(f.right(), f.bottom()),
        Vec2::new(f.right(), f.bottom()) + off,
        Vec2::new(f.x, f.bottom()) + off,
    ];
    canvas.fill_polygon(&floor, darker(colors::GLASS_BACK, 0.2));
    canvas.fill_rect(b, colors::GLASS_BACK);
    canvas.stroke_polygon(&corners(b.x, b.y, b.right(), b.bottom()), EDGE * 0.5, colors::GLASS_EDGE);

    match contents.state {
        MatterState::Solid => {
            let w = g.interior.w * 0.55;
            let h = g.interior.h * 0.45;
            let anchor = Vec2::new(g.interior.x + g.interior.w * 0.3 + g.depth * 0.3, g.interior.bottom() - g.depth * 0.3);
            draw_rock(canvas, anchor, w, h);
        }
        MatterState::Liquid => {
            let liquid = liquid_rect(g.interior, contents.fill);
            if liquid.h > 0.0 {
                let top = liquid.y;
                // 横の陰（右の奥行き面）
                let side = [
                    Vec2::new(liquid.right(), top),
                    Vec2::new(liquid.right(), top) + off,
                    Vec2::new(liquid.right(), liquid.bottom()) + off,
                    Vec2::new(liquid.right(), liquid.bottom()),
                ];
                canvas.fill_polygon(&side, darker(colors::LIQUID, 0.25));
                canvas.fill_rect(liquid, colors::LIQUID);
                // 水面（上の奥行き面）
                let surface = [
                    Vec2::new(liquid.x, top),
                    Vec2::new(liquid.right(), top),
                    Vec2::new(liquid.right(), top) + off,
                    Vec2::new(liquid.x, top) + off,
                ];
                canvas.fill_polygon(&surface, lighter(colors::LIQUID, 0.3));
            }
        }
        MatterState::Gas => draw_particles(canvas, contents.particles),
        MatterState::Empty => {}
    }

    // 手前の壁と、手前と奥をつなぐ辺
    canvas.fill_rect(f, colors::GLASS_FRONT);
    canvas.stroke_polygon(&corners(f.x, f.y, f.right(), f.bottom()), EDGE, colors::GLASS_EDGE);
    for corner in [
        Vec2::new(f.x, f.y),
        Vec2::new(f.right(), f.y),
        Vec2::new(f.right(), f.bottom()),
        Vec2::new(f.x, f.bottom()),
    ] {
        canvas.draw_line(corner, corner + off, EDGE, colors::GLASS_EDGE);
    }
}

fn draw_jar(canvas: &mut Canvas, g: &JarGeometry, contents: &Contents) {
    let body = g.interior.inflate(WALL, 0.0);

    canvas.fill_ellipse(g.bottom, g.rx, g.ry, colors::GLASS_BACK);
    canvas.fill_rect(body, colors::GLASS_BACK);

    match contents.state {
        MatterState::Solid => {
            let w = g.interior.w * 0.7;
            let h = g.interior.h * 0.3;
            let anchor = Vec2::new(g.interior.x + g.interior.w * 0.15, g.bottom.y + g.ry * 0.4);
            draw_rock(canvas, anchor, w, h);
        }
        MatterState::Liquid => {
            let liquid = liquid_rect(g.interior, contents.fill);
            if liquid.h > 0.0 {
                let inner_rx = g.rx - WALL;
                let inner_ry = g.ry * inner_rx / g.rx;
                canvas.fill_ellipse(g.bottom, inner_rx, inner_ry, colors::LIQUID);
                canvas.fill_rect(liquid, colors::LIQUID);
                // 右側の陰
                let band = liquid.w * 0.18;
                let shade = Rect::new(liquid.right() - band, liquid.y, band, liquid.h);
                canvas.fill_rect(shade, darker(colors::LIQUID, 0.25));
                canvas.fill_ellipse(
                    Vec2::new(g.top.x, liquid.y),
                    inner_rx,
                    inner_ry,
                    lighter(colors::LIQUID, 0.3),
                );
            }
        }
        MatterState::Gas => draw_particles(canvas, contents.particles),
        MatterState::Empty => {}
    }

    canvas.stroke_ellipse(g.bottom, g.rx, g.ry, EDGE, colors::GLASS_EDGE);
    canvas.draw_line(
        Vec2::new(g.left(), g.top.y),
        Vec2::new(g.left(), g.bottom.y),
        EDGE,
        colors::GLASS_EDGE,
    );
    canvas.draw_line(
        Vec2::new(g.right(), g.top.y),
        Vec2::new(g.right(), g.bottom.y),
        EDGE,
        colors::GLASS_EDGE,
    );
    canvas.stroke_ellipse(g.top, g.rx, g.ry, EDGE, colors::GLASS_EDGE);
}

fn draw_bowl(canvas: &mut Canvas, g: &BowlGeometry, contents: &Contents) {
    canvas.fill_ellipse(g.center, g.radius, g.radius, colors::GLASS_BACK);

    match contents.state {
        MatterState::Solid => {
            let w = g.interior_radius * 0.9;
            let h = g.interior_radius * 0.6;
            let anchor = Vec2::new(g.center.x - w * 0.5, g.center.y + g.interior_radius * 0.85);
            draw_rock(canvas, anchor, w, h);
        }
        MatterState::Liquid => {
            let r = g.interior_radius;
            let plane = fill_plane(g.center, r, contents.fill);
            canvas.fill_ellipse_clipped(g.center, r, r, colors::LIQUID, |p| p.y >= plane);
            match surface_half_width(g.center, r, plane) {
                Some(half_width) => canvas.fill_ellipse(
                    Vec2::new(g.center.x, plane),
                    half_width,
                    half_width * 0.25,
                    lighter(colors::LIQUID, 0.3),
                ),
                None => tracing::trace!(plane, "bowl liquid surface outside the sphere, skipped"),
            }
        }
        MatterState::Gas => draw_particles(canvas, contents.particles),
        MatterState::Empty => {}
    }

    canvas.fill_ellipse(g.opening, g.opening_rx, g.opening_ry, colors::GLASS_FRONT);
    canvas.stroke_ellipse(g.opening, g.opening_rx, g.opening_ry, EDGE, colors::GLASS_EDGE);
    canvas.stroke_ellipse(g.center, g.radius, g.radius, EDGE, colors::GLASS_EDGE);
}

/// ごつごつした岩。`anchor` は岩の左下（床に接する点）。
fn draw_rock(canvas: &mut Canvas, anchor: Vec2, w: f32, h: f32) {
    let place = |&(u, v): &(f32, f32)| Vec2::new(anchor.x + u * w, anchor.y - h + v * h);
    let outline: Vec<Vec2> = ROCK_OUTLINE.iter().map(place).collect();
    let facet: Vec<Vec2> = ROCK_FACET.iter().map(place).collect();

    canvas.fill_polygon(&outline, colors::ROCK);
    canvas.fill_polygon(&facet, lighter(colors::ROCK, 0.25));
    canvas.stroke_polygon(&outline, 1.5, darker(colors::ROCK, 0.4));
}

fn draw_particles(canvas: &mut Canvas, particles: &[Particle]) {
    for p in particles.iter().filter(|p| p.is_placed()) {
        canvas.fill_ellipse(p.pos, p.radius, p.radius, colors::particle_color(p.tint));
    }
}

fn corners(x0: f32, y0: f32, x1: f32, y1: f32) -> [Vec2; 4] {
    [
        Vec2::new(x0, y0),
        Vec2::new(x1, y0),
        Vec2::new(x1, y1),
        Vec2::new(x0, y1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::core::material::ShapeKind;
    use crate::physics::ParticleTint;

    fn render(shape: ShapeKind, contents: &Contents) -> (Vec<u8>, VesselGeometry) {
        let mut frame = vec![0u8; 240 * 300 * 4];
        let geometry = VesselGeometry::build(shape, Rect::new(50.0, 100.0, 140.0, 140.0), &LayoutConfig::default()).unwrap();
        let mut canvas = Canvas::new(&mut frame, 240, 300);
        canvas.clear([255, 255, 255, 255]);
        draw_vessel(&mut canvas, &geometry, contents);
        (frame, geometry)
    }

    fn pixel(frame: &[u8], x: f32, y: f32) -> [u8; 4] {
        let i = (y as usize * 240 + x as usize) * 4;
        [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
    }

    fn is_bluish(c: [u8; 4]) -> bool {
        c[2] as i32 - c[0] as i32 > 60
    }

    #[test]
    fn box_liquid_fills_from_the_floor() {
        let contents = Contents { state: MatterState::Liquid, fill: 0.5, particles: &[] };
        let (frame, geometry) = render(ShapeKind::Box, &contents);
        let VesselGeometry::Box(g) = geometry else { unreachable!() };
        let x = g.interior.center().x - 10.0;
        assert!(is_bluish(pixel(&frame, x, g.interior.bottom() - 5.0)));
        assert!(!is_bluish(pixel(&frame, x, g.interior.y + 5.0)));
    }

    #[test]
    fn empty_jar_has_no_liquid() {
        let contents = Contents { state: MatterState::Empty, fill: 0.0, particles: &[] };
        let (frame, geometry) = render(ShapeKind::Jar, &contents);
        let VesselGeometry::Jar(g) = geometry else { unreachable!() };
        let c = g.interior.center();
        assert!(!is_bluish(pixel(&frame, c.x, g.interior.bottom() - 5.0)));
    }

    #[test]
    fn bowl_liquid_stays_below_the_plane() {
        let contents = Contents { state: MatterState::Liquid, fill: 0.5, particles: &[] };
        let (frame, geometry) = render(ShapeKind::Bowl, &contents);
        let VesselGeometry::Bowl(g) = geometry else { unreachable!() };
        assert!(is_bluish(pixel(&frame, g.center.x - 30.0, g.center.y + 30.0)));
        assert!(!is_bluish(pixel(&frame, g.center.x - 30.0, g.center.y - 30.0)));
    }

    #[test]
    fn gas_particles_are_painted_where_they_are() {
        let particles = [Particle::placed_at(Vec2::new(120.0, 200.0), Vec2::ZERO, 4.0, ParticleTint::Deep)];
        let contents = Contents { state: MatterState::Gas, fill: 0.0, particles: &particles };
        let (frame, _) = render(ShapeKind::Jar, &contents);
        let c = pixel(&frame, 120.0, 200.0);
        assert!(c[0] < 230 && c[2] > c[1]);
    }
}
