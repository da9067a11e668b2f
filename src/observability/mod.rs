//! Logging and diagnostics setup.
//!
//! The pipeline itself only emits `tracing` events; this module wires a
//! subscriber for applications that want them on stderr. Library users with
//! their own subscriber skip it entirely.

pub mod init;

pub use init::init_tracing;
