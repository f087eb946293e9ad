use glam::Vec2;

use vessel_lab::config::{HitConfig, PhysicsConfig};
use vessel_lab::core::rng::SimRng;
use vessel_lab::core::vessel::{default_vessels, Rect};
use vessel_lab::core::{MatterState, ShapeKind, SimulationStore, VesselBounds, VesselDescriptor, VesselId};
use vessel_lab::physics::{smooth_fill, spawn_batch, step_batch, Confinement, Particle};
use vessel_lab::render::geometry::{fill_plane, surface_half_width};
use vessel_lab::scheduler::NoopRequester;
use vessel_lab::{hits, AppConfig, BufferSurface, FrameScheduler, RenderSurface};

/// Seeded batch of 40 particles with the default physics
pub fn seeded_batch(seed: u64) -> Vec<Particle> {
    let mut rng = SimRng::new(Some(seed));
    spawn_batch(40, &PhysicsConfig::default(), rng.gen_mut())
}

/// Three 140px vessels in a row, 60px apart
pub fn three_in_a_row() -> Vec<VesselBounds> {
    [50.0, 250.0, 450.0]
        .iter()
        .enumerate()
        .map(|(i, &x)| VesselBounds {
            id: VesselId(i as u32 + 1),
            rect: Rect::new(x, 100.0, 140.0, 140.0),
        })
        .collect()
}

pub fn seeded_config(seed: u64) -> AppConfig {
    AppConfig {
        seed: Some(seed),
        ..AppConfig::default()
    }
}

// ==================================================================================
// Fill smoothing
// ==================================================================================

#[test]
fn fill_rises_monotonically_and_converges_geometrically() {
    for target in [0.1f32, 0.4, 0.7, 1.0] {
        let mut fill = 0.0f32;
        for n in 1..=120 {
            let next = smooth_fill(fill, target, 0.05);
            assert!(next >= fill, "fill went down at step {n} for target {target}");
            fill = next;
            let bound = target * 0.95f32.powi(n) + 1e-5;
            assert!((target - fill).abs() <= bound, "step {n}: {fill} vs {target}");
            if n == 60 {
                assert!((target - fill).abs() < target * 0.05);
            }
            if n == 90 {
                assert!((target - fill).abs() < 1e-2);
            }
        }
    }
}

#[test]
fn fill_never_leaves_the_unit_range() {
    let mut fill = 1.0f32;
    for _ in 0..200 {
        fill = smooth_fill(fill, 0.0, 0.05);
        assert!((0.0..=1.0).contains(&fill));
    }
    assert!(fill < 1e-3);
}

// ==================================================================================
// Particle motion
// ==================================================================================

#[test]
fn particles_stay_inside_a_rectangle() {
    let rect = Rect::new(20.0, 40.0, 90.0, 60.0);
    let confinement = Confinement::Rect(rect);
    let mut particles = seeded_batch(11);

    for _ in 0..2_000 {
        step_batch(&mut particles, &confinement);
        for p in &particles {
            assert!(p.pos.x >= rect.x + p.radius - 1e-3 && p.pos.x <= rect.right() - p.radius + 1e-3);
            assert!(p.pos.y >= rect.y + p.radius - 1e-3 && p.pos.y <= rect.bottom() - p.radius + 1e-3);
        }
    }
}

#[test]
fn particles_stay_inside_a_circle() {
    let center = Vec2::new(100.0, 100.0);
    let radius = 45.0;
    let confinement = Confinement::Circle { center, radius };
    let mut particles = seeded_batch(12);

    for _ in 0..2_000 {
        step_batch(&mut particles, &confinement);
        for p in &particles {
            assert!(p.pos.distance(center) <= radius - p.radius + 1e-3);
        }
    }
}

#[test]
fn reflections_keep_the_speed() {
    for confinement in [
        Confinement::Rect(Rect::new(0.0, 0.0, 60.0, 40.0)),
        Confinement::Circle {
            center: Vec2::new(30.0, 30.0),
            radius: 25.0,
        },
    ] {
        let mut particles = seeded_batch(13);
        let speeds: Vec<f32> = particles.iter().map(|p| p.vel.length()).collect();
        for _ in 0..500 {
            step_batch(&mut particles, &confinement);
        }
        for (p, speed) in particles.iter().zip(speeds) {
            assert!((p.vel.length() - speed).abs() < 1e-3);
        }
    }
}

// ==================================================================================
// Simulation store
// ==================================================================================

#[test]
fn gas_batch_appears_and_disappears_with_the_state() {
    let physics = PhysicsConfig::default();
    let confinement = Confinement::Rect(Rect::new(0.0, 0.0, 100.0, 100.0));
    let mut rng = SimRng::new(Some(5));
    let mut store = SimulationStore::new();
    let mut vessel = VesselDescriptor::new(1, ShapeKind::Box, MatterState::Empty, "Box");

    assert!(store.advance(&vessel, Some(&confinement), &physics, rng.gen_mut()).particles.is_empty());

    vessel.state = MatterState::Gas;
    assert_eq!(store.advance(&vessel, Some(&confinement), &physics, rng.gen_mut()).particles.len(), 40);
    assert_eq!(store.advance(&vessel, Some(&confinement), &physics, rng.gen_mut()).particles.len(), 40);

    vessel.state = MatterState::Solid;
    assert!(store.advance(&vessel, Some(&confinement), &physics, rng.gen_mut()).particles.is_empty());
}

// ==================================================================================
// Hit testing
// ==================================================================================

#[test]
fn clicks_resolve_to_vessels_in_a_row() {
    let bounds = three_in_a_row();
    let hit = HitConfig::default();
    assert_eq!(hits(Vec2::new(120.0, 170.0), &bounds, &hit), vec![VesselId(1)]);
    assert_eq!(hits(Vec2::new(10.0, 170.0), &bounds, &hit), vec![VesselId(1)]);
    assert!(hits(Vec2::new(700.0, 170.0), &bounds, &hit).is_empty());
}

// ==================================================================================
// Bowl geometry
// ==================================================================================

#[test]
fn bowl_surface_is_skipped_when_the_plane_misses_the_sphere() {
    assert_eq!(surface_half_width(Vec2::ZERO, 50.0, 60.0), None);
    assert_eq!(surface_half_width(Vec2::ZERO, 50.0, -60.0), None);
    let half = surface_half_width(Vec2::ZERO, 50.0, 30.0).unwrap();
    assert!((half - 40.0).abs() < 1e-4);
    assert!((fill_plane(Vec2::ZERO, 50.0, 0.5)).abs() < 1e-4);
}

// ==================================================================================
// Frame scheduler
// ==================================================================================

#[test]
fn reordering_vessels_keeps_their_animation() {
    let mut scheduler = FrameScheduler::new(&seeded_config(21));
    let mut surface = BufferSurface::new(640, 480);
    scheduler.start(NoopRequester);

    let mut vessels = default_vessels();
    vessels[1].state = MatterState::Liquid;
    for _ in 0..30 {
        scheduler.tick((640, 480), Some(&mut surface), &vessels, None).unwrap();
    }
    let before = scheduler.context().store.slot(VesselId(2)).unwrap().current_fill;
    assert!(before > 0.3);

    vessels.reverse();
    scheduler.tick((640, 480), Some(&mut surface), &vessels, None).unwrap();
    let after = scheduler.context().store.slot(VesselId(2)).unwrap().current_fill;
    assert!(after > before);
    assert_eq!(scheduler.context().store.slot(VesselId(1)).unwrap().current_fill, 0.0);
}

#[test]
fn unknown_shapes_do_not_blank_the_scene() {
    let mut scheduler = FrameScheduler::new(&seeded_config(22));
    let mut surface = BufferSurface::new(800, 480);
    scheduler.start(NoopRequester);

    let mut vessels = default_vessels();
    vessels.insert(1, VesselDescriptor::new(7, ShapeKind::parse("teapot"), MatterState::Gas, "Teapot"));
    let report = scheduler.tick((800, 480), Some(&mut surface), &vessels, None).unwrap();

    assert_eq!(report.vessels_drawn, 3);
    assert_eq!(scheduler.bounds().len(), 4);
    assert_eq!(surface.size(), (800, 480));
}
