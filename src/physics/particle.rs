use glam::Vec2;

use crate::config::PhysicsConfig;
use crate::core::rng::SimRngMethods;
use crate::core::vessel::Rect;

/// 円の壁で跳ね返したあと、壁からどれだけ内側に戻すか。
const CIRCLE_PUSHBACK: f32 = 1.0;

/// 粒子の色の種類。実際の色は描画側が決める。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParticleTint {
    Pale,
    Mid,
    Deep,
}

impl ParticleTint {
    pub const ALL: [ParticleTint; 3] = [ParticleTint::Pale, ParticleTint::Mid, ParticleTint::Deep];
}

/// 気体の粒子。速度は生まれたときに決まり、壁で跳ね返るときだけ向きが変わる。
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub tint: ParticleTint,
    // まだ容器の中に置かれていない粒子は、最初のステップで容器の中心に置かれる
    placed: bool,
}

impl Particle {
    /// 位置未定の粒子。
    pub fn unplaced(vel: Vec2, radius: f32, tint: ParticleTint) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel,
            radius,
            tint,
            placed: false,
        }
    }

    pub fn placed_at(pos: Vec2, vel: Vec2, radius: f32, tint: ParticleTint) -> Self {
        Self {
            pos,
            vel,
            radius,
            tint,
            placed: true,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }
}

/// 粒子が閉じ込められる領域。箱と瓶は矩形、鉢は円。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Confinement {
    Rect(Rect),
    Circle { center: Vec2, radius: f32 },
}

impl Confinement {
    pub fn center(&self) -> Vec2 {
        match self {
            Confinement::Rect(rect) => rect.center(),
            Confinement::Circle { center, .. } => *center,
        }
    }
}

/// 気体の粒子を `count` 個つくる。位置は未定のまま。
pub fn spawn_batch(count: usize, physics: &PhysicsConfig, rng: &mut dyn SimRngMethods) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let vel = Vec2::new(
                rng.gen_f32_between(-physics.speed, physics.speed),
                rng.gen_f32_between(-physics.speed, physics.speed),
            );
            let radius = rng.gen_f32_between(physics.radius_min, physics.radius_max);
            let tint = ParticleTint::ALL[rng.gen_index(ParticleTint::ALL.len())];
            Particle::unplaced(vel, radius, tint)
        })
        .collect()
}

/// 粒子を 1 ティック進めて、壁で跳ね返す。
///
/// 時間刻みは使わない（1 フレーム = 1 ティック）。重力も抵抗も粒子どうしの衝突もなし。
pub fn step(particle: &mut Particle, confinement: &Confinement) {
    if !particle.placed {
        particle.pos = confinement.center();
        particle.placed = true;
    }

    particle.pos += particle.vel;

    match *confinement {
        Confinement::Rect(rect) => bounce_rect(particle, &rect),
        Confinement::Circle { center, radius } => bounce_circle(particle, center, radius),
    }
}

pub fn step_batch(particles: &mut [Particle], confinement: &Confinement) {
    for particle in particles.iter_mut() {
        step(particle, confinement);
    }
}

// 軸ごとに独立して、壁を越えたら壁の内側に戻して速度を反転する
fn bounce_rect(p: &mut Particle, rect: &Rect) {
    let r = p.radius;

    if p.pos.x - r < rect.x {
        p.pos.x = rect.x + r;
        p.vel.x = -p.vel.x;
    } else if p.pos.x + r > rect.right() {
        p.pos.x = rect.right() - r;
        p.vel.x = -p.vel.x;
    }

    if p.pos.y - r < rect.y {
        p.pos.y = rect.y + r;
        p.vel.y = -p.vel.y;
    } else if p.pos.y + r > rect.bottom() {
        p.pos.y = rect.bottom() - r;
        p.vel.y = -p.vel.y;
    }
}

// 法線まわりの鏡面反射: v' = v - 2(v・n)n
fn bounce_circle(p: &mut Particle, center: Vec2, radius: f32) {
    let limit = radius - p.radius;
    let offset = p.pos - center;
    let dist = offset.length();

    if dist <= limit || dist <= f32::EPSILON {
        return;
    }

    let normal = offset / dist;
    p.vel -= 2.0 * p.vel.dot(normal) * normal;
    p.pos = center + normal * (limit - CIRCLE_PUSHBACK).max(0.0);
}
