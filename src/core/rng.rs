//! src/core/rng.rs

use rand::rngs::StdRng;
use rand::{Rng as RandRng, RngCore, SeedableRng};

/// シミュレーションで必要な乱数操作だけを集めた、オブジェクト安全なトレイト。
/// `rand::Rng` はジェネリックメソッドを持つので `dyn` で使えない。
pub trait SimRngMethods: RngCore {
  /// `low..=high` の範囲の `f32` 乱数。`low == high` でもよい。
  fn gen_f32_between(&mut self, low: f32, high: f32) -> f32;

  /// `0..len` の範囲の `usize` 乱数。
  fn gen_index(&mut self, len: usize) -> usize;
}

impl<T: RandRng> SimRngMethods for T {
  fn gen_f32_between(&mut self, low: f32, high: f32) -> f32 {
    self.gen_range(low..=high)
  }

  fn gen_index(&mut self, len: usize) -> usize {
    self.gen_range(0..len)
  }
}

/// 粒子の生成に使う乱数生成器。
///
/// シードを指定すると毎回同じ粒子が生まれるので、テストやヘッドレス実行で再現できる。
pub struct SimRng {
  rng: StdRng,
}

impl SimRng {
  pub fn new(seed: Option<u64>) -> Self {
    let rng = match seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    Self { rng }
  }

  pub fn gen_mut(&mut self) -> &mut dyn SimRngMethods {
    &mut self.rng
  }
}
