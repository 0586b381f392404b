use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, InitCtx};
use crate::device::{ContextConfig, GlContext};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the single-window render loop.
pub struct Runtime;

impl Runtime {
    /// Opens the window, runs `app` until it exits or the window closes, and
    /// returns the first error raised by context creation, `App::init` or a
    /// buffer swap.
    pub fn run<A>(config: RuntimeConfig, context_config: ContextConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState {
            config,
            context_config,
            pending: Some(app),
            running: None,
            error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Fields drop in declaration order: the app (and every GPU object it owns)
/// goes before the context.
struct Running<A> {
    app: A,
    clock: FrameClock,
    context: GlContext,
}

impl<A> Running<A> {
    fn window(&self) -> &Window {
        self.context.window()
    }
}

struct AppState<A> {
    config: RuntimeConfig,
    context_config: ContextConfig,
    pending: Option<A>,
    running: Option<Running<A>>,
    error: Option<anyhow::Error>,
}

impl<A: App> AppState<A> {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        let context = GlContext::new(event_loop, attrs, &self.context_config)?;

        let Some(mut app) = self.pending.take() else {
            return Ok(());
        };
        let size = context.size();
        let mut ctx = InitCtx {
            gpu: context.gpu(),
            size: (size.width, size.height),
        };
        if let Err(err) = app.init(&mut ctx) {
            drop(app);
            return Err(err.context("application init failed"));
        }

        context.window().request_redraw();
        self.running = Some(Running {
            app,
            clock: FrameClock::new(),
            context,
        });
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.running = None;
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        let size = running.context.size();
        let mut ctx = FrameCtx {
            gpu: running.context.gpu(),
            time: running.clock.tick(),
            size: (size.width, size.height),
        };
        if running.app.on_frame(&mut ctx) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        running.window().pre_present_notify();
        if let Err(err) = running.context.swap_buffers() {
            self.fail(event_loop, err);
        }
    }
}

fn is_escape(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: every demo animates.
        if let Some(running) = &self.running {
            running.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::KeyboardInput { event: key, .. } if is_escape(key) => {
                self.shutdown(event_loop)
            }

            WindowEvent::Resized(new_size) => {
                if let Some(running) = self.running.as_mut() {
                    running.context.resize(*new_size);
                    running.window().request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {
                if let Some(running) = self.running.as_mut() {
                    if running.app.on_window_event(&event) == AppControl::Exit {
                        self.shutdown(event_loop);
                    }
                }
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.running = None;
    }
}
