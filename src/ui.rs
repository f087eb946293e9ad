// src/ui.rs

pub mod controls;

use std::sync::Arc;
use winit::window::Window;

use crate::showcase::Showcase;

/// ウィンドウのタイトルバーに選択中の容器と中身を表示する。
///
/// # Arguments
/// * `window_opt` - タイトルを設定する対象のウィンドウ (`Option<&Arc<Window>>`)。
/// * `base` - 設定ファイルのタイトル。
/// * `showcase` - 選択状態を持っているデモの協力者。
pub fn update_window_title(window_opt: Option<&Arc<Window>>, base: &str, showcase: &Showcase) {
    if let Some(window) = window_opt {
        window.set_title(&window_title(base, showcase));
    }
}

pub fn window_title(base: &str, showcase: &Showcase) -> String {
    match showcase.selected_vessel() {
        Some(vessel) => format!("{} | {} ({})", base, vessel.label, vessel.state.name()),
        None => base.to_string(),
    }
}
