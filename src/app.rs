use std::sync::{mpsc, Arc};

use glam::Vec2;
use tracing::{debug, error, info, warn};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::window::{Window, WindowBuilder};
use winit_input_helper::WinitInputHelper;

use crate::config::AppConfig;
use crate::core::material::MatterState;
use crate::error::Error;
use crate::hit_test::{PointerHitTester, VesselEvent};
use crate::input::{self, UserAction};
use crate::renderer::Renderer;
use crate::scheduler::FrameScheduler;
use crate::showcase::Showcase;
use crate::ui;

// App構造体
pub struct App {
    pub window: Option<Arc<Window>>,
    pub renderer: Option<Renderer>,
    /// 描画面と同じ寿命。描画面を作るたびに作り直す。
    scheduler: Option<FrameScheduler<Arc<Window>>>,
    hit_tester: PointerHitTester,
    // 当たり判定からの通知。再描画のたびに全部受け取る
    events: mpsc::Receiver<VesselEvent>,
    showcase: Showcase,
    config: AppConfig,
    mouse_position: Option<Vec2>,
    input: WinitInputHelper,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            window: None,
            renderer: None,
            scheduler: None,
            hit_tester: PointerHitTester::new(config.hit.clone(), tx),
            events: rx,
            showcase: Showcase::new(config.vessels.clone()),
            config,
            mouse_position: None,
            input: WinitInputHelper::new(),
        }
    }

    pub fn handle_event(&mut self, event: Event<()>, elwt: &EventLoopWindowTarget<()>) {
        match &event {
            Event::Resumed => {
                if let Err(err) = self.handle_resume(elwt) {
                    error!("failed to set up the window: {err}");
                    elwt.exit();
                    return;
                }
            }
            Event::Suspended => self.handle_suspend(),
            Event::LoopExiting => {
                if let Some(scheduler) = &mut self.scheduler {
                    scheduler.cancel();
                }
            }
            Event::WindowEvent { window_id, event } => {
                let Some(window) = self.window.clone() else {
                    return;
                };
                if window.id() != *window_id {
                    return;
                }
                let consumed = match &mut self.renderer {
                    Some(renderer) => renderer.gui.handle_window_event(&window, event),
                    None => false,
                };
                match event {
                    WindowEvent::Resized(size) => self.resize(*size),
                    WindowEvent::CursorMoved { position, .. } => self.handle_cursor_moved(*position),
                    WindowEvent::MouseInput { state, button, .. } if !consumed => {
                        self.handle_mouse_input(*state, *button)
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(err) = self.handle_redraw_requested() {
                            warn!("presentation failed, exiting: {err}");
                            self.handle_suspend();
                            elwt.exit();
                            return;
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }

        // キー入力はフレームの区切りでまとめて見る
        if self.input.update(&event) {
            for action in input::collect_actions(&self.input) {
                match action {
                    UserAction::ExitApp => {
                        info!("exit requested");
                        self.handle_suspend();
                        elwt.exit();
                        return;
                    }
                    UserAction::SetState(state) => self.set_selected_state(state),
                }
            }
        }
    }

    pub fn handle_resume(&mut self, event_loop: &EventLoopWindowTarget<()>) -> Result<(), Error> {
        if self.window.is_none() {
            let window = Arc::new(
                WindowBuilder::new()
                    .with_title(&self.config.window.title)
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.config.window.width,
                        self.config.window.height,
                    ))
                    .build(event_loop)?,
            );
            let size = window.inner_size();
            info!(width = size.width, height = size.height, "window created");
            self.window = Some(window);
        }

        let Some(window) = self.window.clone() else {
            return Ok(());
        };
        if self.renderer.is_none() {
            self.renderer = Some(Renderer::new(&window, event_loop)?);
            let mut scheduler = FrameScheduler::new(&self.config);
            scheduler.start(window);
            self.scheduler = Some(scheduler);
        }
        Ok(())
    }

    /// 描画面を捨てる。スケジューラは `Drop` で止まる。
    pub fn handle_suspend(&mut self) {
        if let Some(mut scheduler) = self.scheduler.take() {
            scheduler.cancel();
        }
        self.renderer = None;
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        debug!(width = new_size.width, height = new_size.height, "window resized");
        // 最小化で止まったループは、大きさが戻ったらまた動かす
        if new_size.width > 0 && new_size.height > 0 {
            if let (Some(window), Some(scheduler)) = (&self.window, &mut self.scheduler) {
                scheduler.start(window.clone());
            }
        }
    }

    pub fn handle_cursor_moved(&mut self, position: winit::dpi::PhysicalPosition<f64>) {
        self.mouse_position = Some(Vec2::new(position.x as f32, position.y as f32));
    }

    pub fn handle_mouse_input(&mut self, state: ElementState, button: MouseButton) {
        if button != MouseButton::Left || state != ElementState::Pressed {
            return;
        }
        let (Some(position), Some(scheduler)) = (self.mouse_position, &self.scheduler) else {
            return;
        };
        self.hit_tester.click(position, scheduler.bounds());
    }

    fn set_selected_state(&mut self, state: MatterState) {
        if self.showcase.set_selected_state(state) {
            ui::update_window_title(self.window.as_ref(), &self.config.window.title, &self.showcase);
        }
    }

    pub fn handle_redraw_requested(&mut self) -> Result<(), Error> {
        let Some(window) = self.window.clone() else {
            return Ok(());
        };

        // クリック通知を反映
        let mut selection_changed = false;
        for event in self.events.try_iter() {
            selection_changed |= self.showcase.apply(event);
        }
        if selection_changed {
            ui::update_window_title(Some(&window), &self.config.window.title, &self.showcase);
        }

        let Some(scheduler) = self.scheduler.as_mut() else {
            return Ok(());
        };
        let size = window.inner_size();
        let report = scheduler.tick(
            (size.width, size.height),
            self.renderer.as_mut().map(|r| &mut r.surface),
            self.showcase.vessels(),
            self.showcase.selected(),
        )?;
        if report.skipped {
            return Ok(());
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };
        let bounds = scheduler.bounds();
        let showcase = &self.showcase;
        let pixels_per_point = window.scale_factor() as f32;
        let mut chosen = None;
        renderer.present(&window, |ctx| {
            chosen = ui::controls::draw_ui(ctx, showcase, bounds, pixels_per_point);
        })?;

        if let Some(state) = chosen {
            self.set_selected_state(state);
        }
        Ok(())
    }
}

/// ウィンドウを開いてイベントループを回す。ウィンドウが閉じられるまで戻らない。
pub fn run(config: AppConfig) -> Result<(), Error> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run(move |event, elwt| app.handle_event(event, elwt))?;
    Ok(())
}
