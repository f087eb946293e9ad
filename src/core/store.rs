// 容器ごとのアニメーション状態

use std::collections::HashMap;

use tracing::debug;

use crate::config::PhysicsConfig;
use crate::core::rng::SimRngMethods;
use crate::core::vessel::{VesselDescriptor, VesselId};
use crate::physics::{smooth_fill, spawn_batch, step_batch, Confinement, Particle};

/// 一つの容器のアニメーション状態。
#[derive(Debug, Default, Clone)]
pub struct VesselSlot {
  pub target_fill: f32,
  pub current_fill: f32,
  pub particles: Vec<Particle>,
}

/// すべての容器の状態を ID で持つ。
///
/// 記述子の並び順が変わっても、ID が同じなら水位や粒子はそのまま引き継がれる。
#[derive(Debug, Default)]
pub struct SimulationStore {
  slots: HashMap<VesselId, VesselSlot>,
}

impl SimulationStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// 記述子のリストに合わせてスロットを増減する。
  /// リストから消えた容器の状態は捨て、新しい容器は空の状態から始める。
  pub fn sync(&mut self, descriptors: &[VesselDescriptor]) {
    let before = self.slots.len();
    self.slots
      .retain(|id, _| descriptors.iter().any(|desc| desc.id == *id));
    let removed = before - self.slots.len();

    let mut added = 0;
    for desc in descriptors {
      if !self.slots.contains_key(&desc.id) {
        self.slots.insert(desc.id, VesselSlot::default());
        added += 1;
      }
    }

    if removed > 0 || added > 0 {
      debug!(added, removed, total = self.slots.len(), "vessel slots synced");
    }
  }

  /// 1 フレーム分進める。
  ///
  /// 液体なら水位を目標に近づけ、気体なら粒子を（なければ生成して）動かす。
  /// 気体でなくなった瞬間に粒子は全部消える。`confinement` が `None`（形が不明）のときは
  /// 粒子は生成されるが動かさない。
  pub fn advance(
    &mut self,
    desc: &VesselDescriptor,
    confinement: Option<&Confinement>,
    physics: &PhysicsConfig,
    rng: &mut dyn SimRngMethods,
  ) -> &VesselSlot {
    let slot = self.slots.entry(desc.id).or_default();

    slot.target_fill = desc.state.target_fill(physics.liquid_target);
    slot.current_fill = smooth_fill(slot.current_fill, slot.target_fill, physics.fill_rate);

    if desc.state.is_gas() {
      if slot.particles.is_empty() {
        slot.particles = spawn_batch(physics.particle_count, physics, rng);
        debug!(vessel = %desc.id, count = slot.particles.len(), "gas particles spawned");
      }
      if let Some(confinement) = confinement {
        step_batch(&mut slot.particles, confinement);
      }
    } else if !slot.particles.is_empty() {
      slot.particles.clear();
      debug!(vessel = %desc.id, "gas particles cleared");
    }

    slot
  }

  pub fn slot(&self, id: VesselId) -> Option<&VesselSlot> {
    self.slots.get(&id)
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  pub fn particle_count(&self) -> usize {
    self.slots.values().map(|slot| slot.particles.len()).sum()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::material::{MatterState, ShapeKind};
  use crate::core::rng::SimRng;
  use crate::core::vessel::{default_vessels, Rect};

  fn confinement() -> Confinement {
    Confinement::Rect(Rect::new(0.0, 0.0, 100.0, 100.0))
  }

  #[test]
  fn gas_spawns_a_full_batch_and_leaving_gas_clears_it() {
    let physics = PhysicsConfig::default();
    let mut rng = SimRng::new(Some(11));
    let mut store = SimulationStore::new();
    let mut desc = VesselDescriptor::new(1, ShapeKind::Box, MatterState::Gas, "Box");

    let slot = store.advance(&desc, Some(&confinement()), &physics, rng.gen_mut());
    assert_eq!(slot.particles.len(), 40);
    assert!(slot.particles.iter().all(|p| p.is_placed()));

    desc.state = MatterState::Liquid;
    let slot = store.advance(&desc, Some(&confinement()), &physics, rng.gen_mut());
    assert!(slot.particles.is_empty());
  }

  #[test]
  fn batch_is_not_respawned_while_gas() {
    let physics = PhysicsConfig::default();
    let mut rng = SimRng::new(Some(2));
    let mut store = SimulationStore::new();
    let desc = VesselDescriptor::new(4, ShapeKind::Jar, MatterState::Gas, "Jar");

    let first: Vec<_> = store
      .advance(&desc, Some(&confinement()), &physics, rng.gen_mut())
      .particles
      .iter()
      .map(|p| p.vel)
      .collect();
    let second: Vec<_> = store
      .advance(&desc, Some(&confinement()), &physics, rng.gen_mut())
      .particles
      .iter()
      .map(|p| p.vel.abs())
      .collect();
    let first_abs: Vec<_> = first.iter().map(|v| v.abs()).collect();
    assert_eq!(first_abs, second);
  }

  #[test]
  fn liquid_fill_moves_toward_target() {
    let physics = PhysicsConfig::default();
    let mut rng = SimRng::new(None);
    let mut store = SimulationStore::new();
    let desc = VesselDescriptor::new(1, ShapeKind::Bowl, MatterState::Liquid, "Bowl");

    let slot = store.advance(&desc, None, &physics, rng.gen_mut());
    assert_eq!(slot.target_fill, 0.7);
    assert!((slot.current_fill - 0.035).abs() < 1e-6);
  }

  #[test]
  fn reordering_keeps_state_but_removal_drops_it() {
    let physics = PhysicsConfig::default();
    let mut rng = SimRng::new(Some(5));
    let mut store = SimulationStore::new();
    let mut vessels = default_vessels();
    vessels[0].state = MatterState::Liquid;
    store.sync(&vessels);
    for _ in 0..10 {
      for desc in &vessels {
        store.advance(desc, Some(&confinement()), &physics, rng.gen_mut());
      }
    }
    let fill = store.slot(vessels[0].id).unwrap().current_fill;
    assert!(fill > 0.0);

    vessels.reverse();
    store.sync(&vessels);
    assert_eq!(store.slot(vessels[2].id).unwrap().current_fill, fill);

    let removed = vessels.remove(2);
    store.sync(&vessels);
    assert!(store.slot(removed.id).is_none());
    assert_eq!(store.len(), 2);
  }
}
