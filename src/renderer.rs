pub mod gui;
pub mod surface;

use std::sync::Arc;

use winit::window::Window;

use crate::error::Error;
use gui::Gui;
pub use surface::PixelSurface;

/// フレームバッファ（pixels）と egui オーバーレイをまとめたもの。
pub struct Renderer {
    pub surface: PixelSurface,
    pub gui: Gui,
}

impl Renderer {
    pub fn new(
        window: &Arc<Window>,
        event_loop: &winit::event_loop::EventLoopWindowTarget<()>,
    ) -> Result<Self, Error> {
        let surface = PixelSurface::new(window.clone())?;
        let gui = Gui::new(
            event_loop,
            surface.pixels().device(),
            surface.pixels().render_texture_format(),
            window.scale_factor() as f32,
        );
        Ok(Self { surface, gui })
    }

    /// フレームバッファを画面に出して、その上に egui を重ねる。
    pub fn present(&mut self, window: &Window, ui_closure: impl FnOnce(&egui::Context)) -> Result<(), Error> {
        let Self { surface, gui } = self;
        surface.pixels().render_with(|encoder, target, context| {
            context.scaling_renderer.render(encoder, target);
            gui.render(window, &context.device, &context.queue, encoder, target, ui_closure);
            Ok(())
        })?;
        Ok(())
    }
}
