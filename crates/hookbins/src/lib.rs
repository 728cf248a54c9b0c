//! hookbins - account-scoped webhook bins behind a read-through cache.
//!
//! The pure types and traits live in `hookbins_core`; this crate holds the
//! backends, configuration and the command-line shell.

pub mod cache;
pub mod cli;
pub mod config;
pub mod output;
pub mod state;
pub mod storage;
