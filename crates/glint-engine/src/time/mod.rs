//! Frame timing.
//!
//! The runtime owns one [`FrameClock`] and ticks it once per redraw; apps
//! receive the resulting [`FrameTime`] in their frame context.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
