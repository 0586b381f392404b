use std::ffi::CString;
use std::num::NonZeroU32;

use anyhow::{Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use super::{ContextConfig, Gpu};

/// Owns the window, its GL surface and the current context.
///
/// Fields drop in declaration order: the `Gpu` handle first, then the
/// surface, the context and finally the window. GPU objects created through
/// `gpu()` must be dropped before this value.
pub struct GlContext {
    gpu: Gpu,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
    size: PhysicalSize<u32>,
}

impl GlContext {
    /// Creates a window with a current GL context and applies the global
    /// state requested by `config`.
    pub fn new(
        event_loop: &ActiveEventLoop,
        attrs: WindowAttributes,
        config: &ContextConfig,
    ) -> Result<Self> {
        let depth_bits = if config.depth_test { 24 } else { 0 };
        let template = ConfigTemplateBuilder::new().with_depth_size(depth_bits);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs.clone()))
            .build(event_loop, template, pick_config)
            .map_err(|e| anyhow::anyhow!("failed to create GL display: {e}"))?;

        let window = match window {
            Some(w) => w,
            None => glutin_winit::finalize_window(event_loop, attrs, &gl_config)
                .context("failed to create window")?,
        };

        let raw_handle = window
            .window_handle()
            .context("window has no raw handle")?
            .as_raw();

        let display = gl_config.display();
        let (major, minor) = config.gl_version;
        let context_attrs = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_handle));

        // Safety: `raw_handle` belongs to `window`, which outlives the context.
        let not_current = unsafe { display.create_context(&gl_config, &context_attrs) }
            .with_context(|| format!("failed to create OpenGL {major}.{minor} core context"))?;

        let size = window.inner_size();
        let (width, height) = non_zero_size(size);
        let surface_attrs =
            SurfaceAttributesBuilder::<WindowSurface>::new().build(raw_handle, width, height);
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if config.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                log::warn!("vsync unavailable: {e}");
            }
        }

        // Safety: the context was made current on this thread above.
        let gl = unsafe {
            glow::Context::from_loader_function(|name| {
                CString::new(name)
                    .map(|name| display.get_proc_address(&name))
                    .unwrap_or(std::ptr::null())
            })
        };
        let gpu = Gpu::from_glow(gl);

        if config.srgb {
            gpu.enable(glow::FRAMEBUFFER_SRGB);
        }
        if config.depth_test {
            gpu.enable(glow::DEPTH_TEST);
        }
        if config.cull_back_faces {
            gpu.enable(glow::CULL_FACE);
            gpu.cull_face(glow::BACK);
        }
        gpu.viewport(0, 0, size.width as i32, size.height as i32);

        log::debug!(
            "GL context ready: {major}.{minor} core, {}x{}",
            size.width,
            size.height
        );

        Ok(Self {
            gpu,
            surface,
            context,
            window,
            size,
        })
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Current drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Resizes the surface and viewport.
    ///
    /// A zero-sized surface cannot be configured; only the stored size is
    /// updated in that case.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        let (width, height) = non_zero_size(new_size);
        self.surface.resize(&self.context, width, height);
        self.gpu
            .viewport(0, 0, new_size.width as i32, new_size.height as i32);
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }
}

/// Config with the most MSAA samples.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    // The picker must return a `Config`; glutin reports "no matching config"
    // as an error before calling it.
    configs
        .max_by_key(|c| c.num_samples())
        .expect("config picker called with at least one config")
}

fn non_zero_size(size: PhysicalSize<u32>) -> (NonZeroU32, NonZeroU32) {
    (
        NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
        NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
    )
}
