//! DroidForge - Android toolchain resolution and flag synthesis
//!
//! Given raw build options, DroidForge validates them into a normalized
//! configuration, makes sure the pinned NDK release is installed under
//! the SDK root, and produces the complete toolchain and flag set for
//! an ABI-correct native library build.
//!
//! ## Architecture
//!
//! DroidForge is organized into specialized crates:
//!
//! - `droidforge-core`: shared error type and the raw build options layer
//! - `droidforge-android-toolchain`: host detection, NDK path layout, provisioning
//! - `droidforge-build-config`: validation, flag synthesis, environment application

#![doc(html_root_url = "https://docs.rs/droidforge/")]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;

// Re-export main components for library usage
pub use droidforge_android_toolchain as toolchain;
pub use droidforge_build_config as build_config;
pub use droidforge_core as core;

/// Prelude module for convenient imports
pub mod prelude {
    pub use droidforge_android_toolchain::{
        HostPlatform, NdkPaths, NdkProvider, PreinstalledNdk, SdkManagerInstaller, Toolchain,
        NDK_VERSION,
    };
    pub use droidforge_build_config::{
        synthesize, Arch, BuildConfig, BuildEnv, Define, LtoMode, ResolvedBuildPlan,
    };
    pub use droidforge_core::{BuildOptions, ForgeError, Result};
}
