//! src/input.rs

use winit::keyboard::KeyCode;
use winit_input_helper::WinitInputHelper;

use crate::core::material::MatterState;

/// キーボードやウィンドウ操作から出てくる、アプリ全体へのアクション。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
  /// 選択中の容器の中身を変える
  SetState(MatterState),
  ExitApp,
}

/// 数字キーと状態の対応。パネルのボタンと同じ並び。
const STATE_KEYS: [(KeyCode, MatterState); 4] = [
  (KeyCode::Digit1, MatterState::Empty),
  (KeyCode::Digit2, MatterState::Solid),
  (KeyCode::Digit3, MatterState::Liquid),
  (KeyCode::Digit4, MatterState::Gas),
];

/// ひとつのキーに対応するアクション。
pub fn action_for_key(key: KeyCode) -> Option<UserAction> {
  if key == KeyCode::Escape {
    return Some(UserAction::ExitApp);
  }
  STATE_KEYS
    .iter()
    .find(|(k, _)| *k == key)
    .map(|(_, state)| UserAction::SetState(*state))
}

/// このフレームで押された（押しっぱなしは除く）キーと、閉じる要求からアクションを集める。
///
/// `ExitApp` があるときはそれだけを返すよ。
pub fn collect_actions(input: &WinitInputHelper) -> Vec<UserAction> {
  if input.close_requested() || input.key_pressed(KeyCode::Escape) {
    return vec![UserAction::ExitApp];
  }
  STATE_KEYS
    .iter()
    .filter(|(key, _)| input.key_pressed(*key))
    .filter_map(|(key, _)| action_for_key(*key))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn number_keys_pick_states_in_panel_order() {
    assert_eq!(action_for_key(KeyCode::Digit1), Some(UserAction::SetState(MatterState::Empty)));
    assert_eq!(action_for_key(KeyCode::Digit4), Some(UserAction::SetState(MatterState::Gas)));
    assert_eq!(action_for_key(KeyCode::Escape), Some(UserAction::ExitApp));
    assert_eq!(action_for_key(KeyCode::KeyR), None);
  }

  #[test]
  fn nothing_pressed_means_no_actions() {
    let input = WinitInputHelper::new();
    assert!(collect_actions(&input).is_empty());
  }
}
