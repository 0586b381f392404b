use crate::device::Gpu;
use crate::time::FrameTime;

/// Context handed to [`App::init`](super::App::init).
pub struct InitCtx<'a> {
    pub gpu: &'a Gpu,
    /// Drawable size in physical pixels.
    pub size: (u32, u32),
}

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
pub struct FrameCtx<'a> {
    pub gpu: &'a Gpu,
    pub time: FrameTime,
    /// Drawable size in physical pixels.
    pub size: (u32, u32),
}

impl FrameCtx<'_> {
    /// Clears color and depth.
    pub fn clear(&self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        self.gpu.clear_color(r, g, b, a);
        self.gpu.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
    }

    /// Width over height; `1.0` while the window is minimized.
    pub fn aspect(&self) -> f32 {
        match self.size {
            (w, h) if w > 0 && h > 0 => w as f32 / h as f32,
            _ => 1.0,
        }
    }
}
