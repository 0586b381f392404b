//! Logger setup.
//!
//! The crate logs through the `log` facade only; binaries call
//! [`init_logging`] early in `main` to route records to `env_logger`.

mod init;

pub use init::{LoggingConfig, init_logging};
