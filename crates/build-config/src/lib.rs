//! DroidForge Build Config
//!
//! Validates raw build options into a normalized configuration and
//! synthesizes the complete cross-compilation flag set for it: toolchain
//! executables, compiler/assembler/linker flags, preprocessor definitions
//! and link libraries.

pub mod config;
pub mod env;
pub mod flags;
pub mod plan;

pub use config::{Arch, BuildConfig, ConfigError, LtoMode};
pub use env::BuildEnv;
pub use flags::synthesize;
pub use plan::{Define, ResolvedBuildPlan};

/// Shared library suffix for Android targets
pub const SHARED_LIB_SUFFIX: &str = ".so";

/// soname every produced library carries
pub const OUTPUT_SONAME: &str = "libdroidforge_android.so";
