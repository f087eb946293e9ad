//! 1 フレームごとにシミュレーションを進めて描画する、フレームスケジューラ。
//!
//! 状態は `Idle`（次のフレームを要求していない）と `Running`（要求済み）の二つだけ。
//! `start` で走り出し、毎フレーム `tick` の最後に次のフレームを要求する。止まるのは
//! `cancel` したとき（と、描画先がなくてフレームを飛ばしたとき）だけで、どちらも `Idle` に戻る。`Drop` でも `cancel` するので、
//! 壊れたウィンドウに向かって再描画要求が出続けることはない。

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::config::AppConfig;
use crate::core::layout::{compute_bounds, horizon_y};
use crate::core::rng::SimRng;
use crate::core::store::SimulationStore;
use crate::core::vessel::{VesselBounds, VesselDescriptor, VesselId};
use crate::error::Error;
use crate::render::scene::{draw_background, draw_ground_mark};
use crate::render::{draw_vessel, Canvas, Contents, VesselGeometry};

/// 次のフレームを要求する手段。winit なら `request_redraw`。
pub trait FrameRequester {
    fn request_frame(&self);
}

impl FrameRequester for winit::window::Window {
    fn request_frame(&self) {
        self.request_redraw();
    }
}

impl<T: FrameRequester + ?Sized> FrameRequester for Arc<T> {
    fn request_frame(&self) {
        (**self).request_frame();
    }
}

/// 何もしない要求先。ヘッドレス実行では呼び出し側が自分でループを回す。
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRequester;

impl FrameRequester for NoopRequester {
    fn request_frame(&self) {}
}

/// 描画先の RGBA フレームバッファ。
pub trait RenderSurface {
    fn size(&self) -> (u32, u32);
    fn resize(&mut self, width: u32, height: u32) -> Result<(), Error>;
    fn frame_mut(&mut self) -> &mut [u8];
}

/// メモリ上のフレームバッファ。ヘッドレス実行とテスト用。
#[derive(Debug, Clone)]
pub struct BufferSurface {
    width: u32,
    height: u32,
    frame: Vec<u8>,
}

impl BufferSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.frame[i], self.frame[i + 1], self.frame[i + 2], self.frame[i + 3]])
    }
}

impl RenderSurface for BufferSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        self.width = width;
        self.height = height;
        self.frame = vec![0; width as usize * height as usize * 4];
        Ok(())
    }

    fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.frame
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// 1 フレームの結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    pub frame: u64,
    pub skipped: bool,
    pub resized: bool,
    pub vessels_drawn: usize,
    pub particles: usize,
}

/// スケジューラが持つシミュレーションの文脈。描画面の寿命と一緒に作られて捨てられる。
pub struct SimContext {
    pub store: SimulationStore,
    pub bounds: Vec<VesselBounds>,
    rng: SimRng,
    config: AppConfig,
    warned_unknown: HashSet<VesselId>,
}

impl SimContext {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: SimulationStore::new(),
            bounds: Vec::new(),
            rng: SimRng::new(config.seed),
            config: config.clone(),
            warned_unknown: HashSet::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

pub struct FrameScheduler<R: FrameRequester> {
    state: SchedulerState,
    requester: Option<R>,
    context: SimContext,
    viewport: Option<(u32, u32)>,
    frame: u64,
}

impl<R: FrameRequester> FrameScheduler<R> {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            state: SchedulerState::Idle,
            requester: None,
            context: SimContext::new(config),
            viewport: None,
            frame: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// `Idle -> Running`。最初のフレームを要求する。
    /// すでに走っているときは要求先を差し替えて、もう一度要求するだけ。
    pub fn start(&mut self, requester: R) {
        if self.state == SchedulerState::Idle {
            info!("frame scheduler started");
        }
        self.state = SchedulerState::Running;
        requester.request_frame();
        self.requester = Some(requester);
    }

    /// `Running -> Idle`。要求先を手放すので、以後フレームは要求されない。
    pub fn cancel(&mut self) {
        if self.state == SchedulerState::Running {
            info!(frames = self.frame, "frame scheduler cancelled");
        }
        self.state = SchedulerState::Idle;
        self.requester = None;
    }

    /// 直近のフレームで計算した容器の枠。当たり判定に使う。
    pub fn bounds(&self) -> &[VesselBounds] {
        &self.context.bounds
    }

    pub fn context(&self) -> &SimContext {
        &self.context
    }

    /// 1 フレーム分の処理。
    ///
    /// 1. ビューポートの大きさが変わっていたら描画面をリサイズ
    /// 2. 容器の枠を計算し直す
    /// 3. 背景を描く
    /// 4. 容器ごとに状態を進めて描く
    /// 5. 次のフレームを要求
    ///
    /// 描画面がない（または大きさが 0）のときは何もせずにフレームを飛ばし、次も要求しない。
    /// このとき `Idle` に戻るが要求先は持ったままなので、もう一度 `start` すればループが再開する。
    pub fn tick<S: RenderSurface + ?Sized>(
        &mut self,
        viewport: (u32, u32),
        surface: Option<&mut S>,
        descriptors: &[VesselDescriptor],
        selected: Option<VesselId>,
    ) -> Result<FrameReport, Error> {
        if self.state == SchedulerState::Idle {
            return Ok(FrameReport {
                frame: self.frame,
                skipped: true,
                ..FrameReport::default()
            });
        }

        let surface = match surface {
            Some(surface) if viewport.0 > 0 && viewport.1 > 0 => surface,
            _ => {
                debug!(?viewport, "no drawing surface, frame skipped");
                self.state = SchedulerState::Idle;
                return Ok(FrameReport {
                    frame: self.frame,
                    skipped: true,
                    ..FrameReport::default()
                });
            }
        };

        let mut report = FrameReport::default();
        if self.viewport != Some(viewport) || surface.size() != viewport {
            surface.resize(viewport.0, viewport.1)?;
            self.viewport = Some(viewport);
            report.resized = true;
            debug!(width = viewport.0, height = viewport.1, "drawing surface resized");
        }

        let SimContext {
            store,
            bounds,
            rng,
            config,
            warned_unknown,
        } = &mut self.context;

        *bounds = compute_bounds(viewport, descriptors, &config.layout);
        store.sync(descriptors);

        let (width, height) = surface.size();
        let mut canvas = Canvas::new(surface.frame_mut(), width, height);
        draw_background(&mut canvas, horizon_y(height, &config.layout));

        for (desc, vessel) in descriptors.iter().zip(bounds.iter()) {
            let geometry = VesselGeometry::build(desc.shape, vessel.rect, &config.layout);
            let confinement = geometry.as_ref().map(|g| g.confinement());
            let slot = store.advance(desc, confinement.as_ref(), &config.physics, rng.gen_mut());

            let Some(geometry) = geometry else {
                if warned_unknown.insert(desc.id) {
                    warn!(vessel = %desc.id, label = %desc.label, "unknown vessel shape, not drawn");
                }
                continue;
            };

            draw_ground_mark(&mut canvas, &geometry, selected == Some(desc.id));
            let contents = Contents {
                state: desc.state,
                fill: slot.current_fill,
                particles: &slot.particles,
            };
            draw_vessel(&mut canvas, &geometry, &contents);
            report.vessels_drawn += 1;
        }

        self.frame += 1;
        report.frame = self.frame;
        report.particles = store.particle_count();
        trace!(
            frame = report.frame,
            vessels = report.vessels_drawn,
            particles = report.particles,
            "frame drawn"
        );

        if let Some(requester) = &self.requester {
            requester.request_frame();
        }
        Ok(report)
    }
}

impl<R: FrameRequester> Drop for FrameScheduler<R> {
    fn drop(&mut self) {
        self.cancel();
    }
}
