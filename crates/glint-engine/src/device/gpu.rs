use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::error::{Error, Result};

use super::backend::GlBackend;
use super::error::gl_error_name;

/// Shared handle to the active GL backend.
///
/// Cloning is cheap; every GPU-owning object keeps a clone so it can release
/// its objects on drop. `Gpu` is `!Send`: GL calls must stay on the thread
/// that owns the context.
#[derive(Clone)]
pub struct Gpu {
    backend: Rc<dyn GlBackend>,
}

impl Gpu {
    /// Wraps a backend.
    pub fn new(backend: impl GlBackend + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    /// Wraps an already shared backend (tests keep a second `Rc` to inspect it).
    pub fn from_rc(backend: Rc<dyn GlBackend>) -> Self {
        Self { backend }
    }

    /// Wraps a loaded `glow` context.
    pub fn from_glow(context: glow::Context) -> Self {
        Self::new(context)
    }

    /// Returns the first pending GL error, if any.
    ///
    /// Errors are only surfaced where this is called explicitly; there is no
    /// automatic checking after each call.
    pub fn check_error(&self, context: &str) -> Result<()> {
        match self.backend.get_error() {
            glow::NO_ERROR => Ok(()),
            code => Err(Error::Driver {
                context: context.to_string(),
                code,
                name: gl_error_name(code),
            }),
        }
    }
}

impl Deref for Gpu {
    type Target = dyn GlBackend;

    fn deref(&self) -> &Self::Target {
        self.backend.as_ref()
    }
}

impl fmt::Debug for Gpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gpu").finish_non_exhaustive()
    }
}
