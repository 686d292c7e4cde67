//! Android Toolchain
//!
//! Handles everything about where the cross-toolchain lives and how it
//! gets there:
//! - Host platform detection (which NDK prebuilt to use)
//! - NDK path layout under the SDK root
//! - Provisioning of the pinned NDK release via `sdkmanager`

pub mod host;
pub mod ndk;
pub mod provision;

pub use host::{HostPlatform, HostPlatformError};
pub use ndk::{NdkPaths, Toolchain};
pub use provision::{NdkProvider, PreinstalledNdk, ProvisionError, SdkManagerInstaller};

/// The NDK release every build is pinned to.
///
/// This is the single source of truth for the version; path layout,
/// provisioning and any generated project configuration all derive
/// from it.
pub const NDK_VERSION: &str = "23.2.8568313";
