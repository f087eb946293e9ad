use egui::{Align2, Color32, Context, FontId, LayerId};

use crate::core::material::MatterState;
use crate::core::vessel::VesselBounds;
use crate::showcase::{fact, Showcase};

/// ラベルと選択パネルを描く。ボタンが押されたらその状態を返す。
///
/// `bounds` は物理ピクセル単位なので、egui のポイントに直すために `pixels_per_point` で割る。
pub fn draw_ui(
    ctx: &Context,
    showcase: &Showcase,
    bounds: &[VesselBounds],
    pixels_per_point: f32,
) -> Option<MatterState> {
    draw_labels(ctx, showcase, bounds, pixels_per_point);

    let mut chosen = None;
    egui::Window::new("Vessel")
        .title_bar(false)
        .movable(false)
        .resizable(false)
        .default_pos(egui::pos2(10.0, 10.0))
        .show(ctx, |ui| {
            let Some(vessel) = showcase.selected_vessel() else {
                ui.label("Click a vessel to select it.");
                return;
            };
            ui.heading(&vessel.label);
            ui.label(fact(vessel.state));
            ui.separator();
            ui.horizontal(|ui| {
                for (i, state) in MatterState::ALL.into_iter().enumerate() {
                    if ui
                        .selectable_label(vessel.state == state, state.name())
                        .on_hover_text(format!("key {}", i + 1))
                        .clicked()
                    {
                        chosen = Some(state);
                    }
                }
            });
        });
    chosen
}

// 容器の名前は、それぞれの枠の下に
fn draw_labels(ctx: &Context, showcase: &Showcase, bounds: &[VesselBounds], pixels_per_point: f32) {
    let painter = ctx.layer_painter(LayerId::background());
    let ppp = pixels_per_point.max(f32::EPSILON);
    for b in bounds {
        let Some(vessel) = showcase.vessels().iter().find(|v| v.id == b.id) else {
            continue;
        };
        let pos = egui::pos2(b.rect.center().x / ppp, (b.rect.bottom() + 6.0) / ppp);
        painter.text(
            pos,
            Align2::CENTER_TOP,
            &vessel.label,
            FontId::proportional(16.0),
            Color32::from_gray(40),
        );
    }
}
