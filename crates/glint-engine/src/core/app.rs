use winit::event::WindowEvent;

use super::ctx::{FrameCtx, InitCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
///
/// The app is dropped before the GL context, so GPU objects it owns are
/// released while the context is still current.
pub trait App {
    /// Called once the context is current, before the first frame. Load
    /// shaders, meshes and textures here.
    fn init(&mut self, ctx: &mut InitCtx<'_>) -> anyhow::Result<()>;

    /// Called for every window event the runtime does not consume itself.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per redraw, before the buffers are swapped.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
