//! GL device access.
//!
//! This module is responsible for:
//! - the `GlBackend` seam (the GL calls this crate makes) and its `glow` implementation
//! - the shared `Gpu` handle every GPU-owning object keeps
//! - creating a window with a current context (`GlContext`)
//! - translating GL error codes

mod backend;
mod context;
mod error;
mod glow_backend;
mod gpu;
mod init;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{GlBackend, NO_ID, RawId};
pub use context::GlContext;
pub use error::{GL_ERROR_NAMES, gl_error_name};
pub use gpu::Gpu;
pub use init::ContextConfig;
