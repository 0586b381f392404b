//! glint engine crate.
//!
//! OpenGL object ownership (`resource`), the mesh / texture / material /
//! model data model (`render`), asset loading (`assets`) and a small
//! single-window runtime the demos are built on.

pub mod error;
pub mod logging;

pub mod device;
pub mod resource;
pub mod render;
pub mod assets;

pub mod time;
pub mod core;
pub mod window;

pub use error::{Error, Result};
