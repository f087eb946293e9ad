// 容器とその中身の種類

use serde::{Deserialize, Deserializer, Serialize};

/// 容器の中身の状態。どの状態にするかは外側（UI）が決めるよ。
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatterState {
  #[default]
  Empty,
  Solid,
  Liquid,
  Gas,
}

impl MatterState {
  pub const ALL: [MatterState; 4] = [
    MatterState::Empty,
    MatterState::Solid,
    MatterState::Liquid,
    MatterState::Gas,
  ];

  /// 液体のときだけ目標の水位を持つ。
  pub fn target_fill(&self, liquid_target: f32) -> f32 {
    match self {
      MatterState::Liquid => liquid_target,
      _ => 0.0,
    }
  }

  pub fn is_gas(&self) -> bool {
    matches!(self, MatterState::Gas)
  }

  pub fn name(&self) -> &'static str {
    match self {
      MatterState::Empty => "Empty",
      MatterState::Solid => "Solid",
      MatterState::Liquid => "Liquid",
      MatterState::Gas => "Gas",
    }
  }

  /// 次の状態（Empty -> Solid -> Liquid -> Gas -> Empty）。
  pub fn next(&self) -> MatterState {
    match self {
      MatterState::Empty => MatterState::Solid,
      MatterState::Solid => MatterState::Liquid,
      MatterState::Liquid => MatterState::Gas,
      MatterState::Gas => MatterState::Empty,
    }
  }
}

/// 容器の形。三種類だけ。
///
/// 設定ファイルなど外から知らない形が渡されたときは `Unknown` になる。
/// `Unknown` の容器は描画をスキップするだけで、他の容器には影響しないよ。
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
  Box,
  Jar,
  Bowl,
  Unknown,
}

impl ShapeKind {
  pub fn parse(name: &str) -> ShapeKind {
    match name.trim().to_ascii_lowercase().as_str() {
      "box" => ShapeKind::Box,
      "jar" => ShapeKind::Jar,
      "bowl" => ShapeKind::Bowl,
      _ => ShapeKind::Unknown,
    }
  }
}

impl<'de> Deserialize<'de> for ShapeKind {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(ShapeKind::parse(&name))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_liquid_has_a_fill_target() {
    assert_eq!(MatterState::Liquid.target_fill(0.7), 0.7);
    assert_eq!(MatterState::Gas.target_fill(0.7), 0.0);
    assert_eq!(MatterState::Solid.target_fill(0.7), 0.0);
    assert_eq!(MatterState::Empty.target_fill(0.7), 0.0);
  }

  #[test]
  fn shape_names_are_case_insensitive() {
    assert_eq!(ShapeKind::parse("BOX"), ShapeKind::Box);
    assert_eq!(ShapeKind::parse(" jar "), ShapeKind::Jar);
    assert_eq!(ShapeKind::parse("Bowl"), ShapeKind::Bowl);
    assert_eq!(ShapeKind::parse("teapot"), ShapeKind::Unknown);
  }

  #[test]
  fn next_cycles_through_every_state() {
    let mut state = MatterState::Empty;
    for expected in [
      MatterState::Solid,
      MatterState::Liquid,
      MatterState::Gas,
      MatterState::Empty,
    ] {
      state = state.next();
      assert_eq!(state, expected);
    }
  }
}
