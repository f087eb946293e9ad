//! デモ用の外側の協力者。
//!
//! 容器の一覧と選択中の ID を持っていて、クリック通知を受けて選択を切り替え、
//! ボタンやキーで選択中の容器の中身を書き換える。コアはこれを毎フレーム読むだけ。

use tracing::debug;

use crate::core::material::MatterState;
use crate::core::vessel::{VesselDescriptor, VesselId};
use crate::hit_test::VesselEvent;

/// 状態ごとのひとこと。
pub fn fact(state: MatterState) -> &'static str {
    match state {
        MatterState::Empty => "Nothing inside yet. Pick a state below.",
        MatterState::Solid => "Solids keep their own shape no matter the container.",
        MatterState::Liquid => "Liquids take the shape of the container but keep their volume.",
        MatterState::Gas => "Gases spread out to fill the whole container.",
    }
}

#[derive(Debug, Clone)]
pub struct Showcase {
    vessels: Vec<VesselDescriptor>,
    selected: Option<VesselId>,
}

impl Showcase {
    pub fn new(vessels: Vec<VesselDescriptor>) -> Self {
        Self {
            vessels,
            selected: None,
        }
    }

    pub fn vessels(&self) -> &[VesselDescriptor] {
        &self.vessels
    }

    pub fn selected(&self) -> Option<VesselId> {
        self.selected
    }

    pub fn selected_vessel(&self) -> Option<&VesselDescriptor> {
        let id = self.selected?;
        self.vessels.iter().find(|v| v.id == id)
    }

    /// クリック通知を反映する。ID が複数あれば順番に選択するので、最後のものが残る。
    /// 選択が変わったら `true`。
    pub fn apply(&mut self, event: VesselEvent) -> bool {
        match event {
            VesselEvent::Clicked(ids) => {
                let before = self.selected;
                for id in ids {
                    if self.vessels.iter().any(|v| v.id == id) {
                        self.selected = Some(id);
                    }
                }
                if before != self.selected {
                    debug!(selected = ?self.selected, "selection changed");
                }
                before != self.selected
            }
        }
    }

    /// 選択中の容器の中身を変える。何も選ばれていなければ何もしない。
    pub fn set_selected_state(&mut self, state: MatterState) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        match self.vessels.iter_mut().find(|v| v.id == id) {
            Some(vessel) if vessel.state != state => {
                debug!(vessel = %id, from = vessel.state.name(), to = state.name(), "matter state changed");
                vessel.state = state;
                true
            }
            _ => false,
        }
    }

    /// 全部の容器を次の状態へ。ヘッドレス実行で使う。
    pub fn cycle_all(&mut self) {
        for vessel in &mut self.vessels {
            vessel.state = vessel.state.next();
        }
    }
}
