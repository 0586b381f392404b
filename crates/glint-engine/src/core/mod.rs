//! Contract between the runtime loop and applications.
//!
//! Apps never see the window or the context directly; they get a `Gpu`
//! handle, frame timing and the drawable size.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InitCtx};
