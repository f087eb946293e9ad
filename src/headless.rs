//! GPU なしで回すモード。メモリ上のフレームバッファにスケジューラを N 回回す。

use tracing::info;

use crate::config::AppConfig;
use crate::core::vessel::VesselId;
use crate::error::Error;
use crate::scheduler::{BufferSurface, FrameScheduler, NoopRequester};
use crate::showcase::Showcase;

/// これだけのフレームごとに、全部の容器を次の状態へ進める。
pub const CYCLE_FRAMES: u64 = 90;

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u64,
    pub skipped: u64,
    /// 最後のフレームの粒子数
    pub particles: usize,
    /// 容器ごとの水位の平均（全フレーム）
    pub mean_fill: Vec<(VesselId, f32)>,
}

pub fn run(config: &AppConfig, frames: u64) -> Result<HeadlessSummary, Error> {
    let viewport = (config.window.width, config.window.height);
    let mut surface = BufferSurface::new(viewport.0, viewport.1);
    let mut showcase = Showcase::new(config.vessels.clone());
    let mut scheduler = FrameScheduler::new(config);
    scheduler.start(NoopRequester);

    let mut fill_sums = vec![0.0f32; showcase.vessels().len()];
    let mut summary = HeadlessSummary {
        frames: 0,
        skipped: 0,
        particles: 0,
        mean_fill: Vec::new(),
    };

    for frame in 0..frames {
        if frame > 0 && frame % CYCLE_FRAMES == 0 {
            showcase.cycle_all();
        }
        let report = scheduler.tick(viewport, Some(&mut surface), showcase.vessels(), showcase.selected())?;
        if report.skipped {
            summary.skipped += 1;
            continue;
        }
        summary.frames += 1;
        summary.particles = report.particles;

        let store = &scheduler.context().store;
        for (sum, vessel) in fill_sums.iter_mut().zip(showcase.vessels()) {
            if let Some(slot) = store.slot(vessel.id) {
                *sum += slot.current_fill;
            }
        }
    }
    scheduler.cancel();

    let drawn = summary.frames.max(1) as f32;
    summary.mean_fill = showcase
        .vessels()
        .iter()
        .zip(fill_sums)
        .map(|(vessel, sum)| (vessel.id, sum / drawn))
        .collect();

    info!(
        frames = summary.frames,
        skipped = summary.skipped,
        particles = summary.particles,
        "headless run finished"
    );
    for (id, fill) in &summary.mean_fill {
        info!(vessel = %id, mean_fill = f64::from(*fill), "fill summary");
    }
    Ok(summary)
}
