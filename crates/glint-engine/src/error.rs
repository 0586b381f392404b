use std::fmt;
use std::path::PathBuf;

use crate::render::ShaderStage;

/// Failure raised while loading or building GPU resources.
///
/// Every variant aborts the whole load it occurred in; nothing here is
/// recovered locally.
#[derive(Debug)]
pub enum Error {
    /// A file could not be opened or read.
    Io { path: PathBuf, source: std::io::Error },

    /// An image or scene file was read but could not be decoded.
    Decode { path: PathBuf, message: String },

    /// A shader stage failed to compile. `log` is the driver's info log.
    Compile { stage: ShaderStage, log: String },

    /// A program failed to link. `log` is the driver's info log.
    Link { log: String },

    /// A GL error code was pending when checked.
    Driver {
        context: String,
        code: u32,
        name: &'static str,
    },

    /// The driver refused to allocate an object.
    Resource { kind: &'static str, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Decode { path, message } => {
                write!(f, "failed to decode {}: {message}", path.display())
            }
            Self::Compile { stage, log } => {
                write!(f, "{stage} shader compilation error:\n{log}")
            }
            Self::Link { log } => write!(f, "shader program linking error:\n{log}"),
            Self::Driver { context, code, name } => {
                write!(f, "{context}: GL error {name} (0x{code:04X})")
            }
            Self::Resource { kind, message } => {
                write!(f, "failed to create {kind}: {message}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
