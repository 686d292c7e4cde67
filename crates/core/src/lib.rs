//! DroidForge Core - Shared error types and the build options layer
//!
//! This crate provides the pieces every other DroidForge crate leans on:
//! the central error type and the raw build options as users supply them
//! (options file, environment variables, `key=value` pairs).

pub mod error;
pub mod options;

pub use error::{ForgeError, Result};
pub use options::BuildOptions;

/// Target platform name
pub const PLATFORM_NAME: &str = "Android";

/// Default options file name, looked up in the working directory
pub const DEFAULT_OPTIONS_FILE: &str = "droidforge.toml";
