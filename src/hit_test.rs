//! クリック位置から容器を探す。

use std::sync::mpsc::Sender;

use glam::Vec2;
use tracing::debug;

use crate::config::{HitConfig, HitPolicy};
use crate::core::vessel::{VesselBounds, VesselId};

/// コアから外側への通知。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VesselEvent {
    /// 容器がクリックされた。当たり判定が重なっていれば複数の ID が入る（枠の並び順）。
    Clicked(Vec<VesselId>),
}

/// `point` を含む容器の ID を返す。
///
/// 当たり判定は枠を左右に `pad_x`、上下に `pad_y` だけ広げた矩形（境界を含む）。
/// `HitPolicy::All` なら該当するものを全部、`Nearest` なら枠の中心がいちばん近いもの一つ。
pub fn hits(point: Vec2, bounds: &[VesselBounds], hit: &HitConfig) -> Vec<VesselId> {
    let matching = bounds
        .iter()
        .filter(|b| b.rect.inflate(hit.pad_x, hit.pad_y).contains(point));

    match hit.policy {
        HitPolicy::All => matching.map(|b| b.id).collect(),
        HitPolicy::Nearest => matching
            .min_by(|a, b| {
                let da = a.rect.center().distance_squared(point);
                let db = b.rect.center().distance_squared(point);
                da.total_cmp(&db)
            })
            .map(|b| vec![b.id])
            .unwrap_or_default(),
    }
}

/// 最後に計算された枠を使ってクリックを判定し、当たった容器を通知する。
///
/// シミュレーションの状態には触らない。選択状態をどうするかは受け取った側が決める。
pub struct PointerHitTester {
    config: HitConfig,
    events: Sender<VesselEvent>,
}

impl PointerHitTester {
    pub fn new(config: HitConfig, events: Sender<VesselEvent>) -> Self {
        Self { config, events }
    }

    pub fn click(&self, point: Vec2, bounds: &[VesselBounds]) -> Vec<VesselId> {
        let ids = hits(point, bounds, &self.config);
        if ids.is_empty() {
            return ids;
        }

        debug!(x = point.x, y = point.y, ?ids, "vessel clicked");
        if self.events.send(VesselEvent::Clicked(ids.clone())).is_err() {
            debug!("nobody is listening for vessel events");
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::layout::compute_bounds;
    use crate::core::material::ShapeKind;
    use crate::core::vessel::{default_vessels, Rect};
    use crate::render::VesselGeometry;
    use std::sync::mpsc;

    fn row() -> Vec<VesselBounds> {
        [50.0, 250.0, 450.0]
            .iter()
            .enumerate()
            .map(|(i, &x)| VesselBounds {
                id: VesselId(i as u32 + 1),
                rect: Rect::new(x, 100.0, 140.0, 140.0),
            })
            .collect()
    }

    #[test]
    fn overlapping_hitboxes_report_every_match_in_order() {
        let ids = hits(Vec2::new(220.0, 170.0), &row(), &HitConfig::default());
        assert_eq!(ids, vec![VesselId(1), VesselId(2)]);
    }

    #[test]
    fn nearest_policy_reports_one() {
        let hit = HitConfig {
            policy: HitPolicy::Nearest,
            ..HitConfig::default()
        };
        assert_eq!(hits(Vec2::new(215.0, 170.0), &row(), &hit), vec![VesselId(1)]);
        assert_eq!(hits(Vec2::new(225.0, 170.0), &row(), &hit), vec![VesselId(2)]);
        assert!(hits(Vec2::new(700.0, 170.0), &row(), &hit).is_empty());
    }

    #[test]
    fn vertical_padding_is_applied() {
        let hit = HitConfig::default();
        assert_eq!(hits(Vec2::new(120.0, 60.0), &row(), &hit), vec![VesselId(1)]);
        assert!(hits(Vec2::new(120.0, 59.0), &row(), &hit).is_empty());
        assert_eq!(hits(Vec2::new(120.0, 280.0), &row(), &hit), vec![VesselId(1)]);
        assert!(hits(Vec2::new(120.0, 281.0), &row(), &hit).is_empty());
    }

    #[test]
    fn clicking_the_drawn_jar_rim_selects_the_jar() {
        let config = AppConfig::default();
        let vessels = default_vessels();
        let bounds = compute_bounds((640, 480), &vessels, &config.layout);
        let jar = &bounds[1];
        let Some(VesselGeometry::Jar(geometry)) = VesselGeometry::build(ShapeKind::Jar, jar.rect, &config.layout) else {
            panic!("jar geometry expected");
        };

        // 瓶は枠より上にはみ出して描かれる
        let rim_top = geometry.top.y - geometry.ry;
        assert!(rim_top < jar.rect.y);

        let click = Vec2::new(geometry.top.x, rim_top + 4.0);
        assert_eq!(hits(click, &bounds, &config.hit), vec![jar.id]);
    }

    #[test]
    fn click_sends_an_event_only_on_a_hit() {
        let (tx, rx) = mpsc::channel();
        let tester = PointerHitTester::new(HitConfig::default(), tx);
        tester.click(Vec2::new(700.0, 170.0), &row());
        assert!(rx.try_recv().is_err());

        tester.click(Vec2::new(320.0, 170.0), &row());
        assert_eq!(rx.try_recv(), Ok(VesselEvent::Clicked(vec![VesselId(2)])));
    }

    #[test]
    fn dropped_receiver_is_not_an_error() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let tester = PointerHitTester::new(HitConfig::default(), tx);
        assert_eq!(tester.click(Vec2::new(120.0, 170.0), &row()), vec![VesselId(1)]);
    }
}
