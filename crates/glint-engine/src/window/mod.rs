//! Window + render loop.
//!
//! Owns the `winit` event loop and the single window with its GL context,
//! and drives a [`core::App`](crate::core::App) through it.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
