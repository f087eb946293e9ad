use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use crate::error::Error;
use crate::scheduler::RenderSurface;

/// ウィンドウに貼りつけた `pixels` のフレームバッファ。
///
/// バッファの大きさはいつもウィンドウの物理ピクセルと同じにしておく（拡大縮小なし）。
pub struct PixelSurface {
    pixels: Pixels<'static>,
    width: u32,
    height: u32,
}

impl PixelSurface {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));
        let surface_texture = SurfaceTexture::new(width, height, window);
        let pixels = Pixels::new(width, height, surface_texture)?;
        Ok(Self { pixels, width, height })
    }

    pub fn pixels(&self) -> &Pixels<'static> {
        &self.pixels
    }
}

impl RenderSurface for PixelSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        self.pixels.resize_surface(width, height)?;
        self.pixels.resize_buffer(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn frame_mut(&mut self) -> &mut [u8] {
        self.pixels.frame_mut()
    }
}
