//! NDK path layout
//!
//! Path arithmetic for the pinned NDK release inside an SDK root. Nothing
//! here touches the filesystem; provisioning is responsible for making
//! the directories real.

use std::path::{Path, PathBuf};

use crate::host::HostPlatform;
use crate::NDK_VERSION;

/// Locations of the pinned NDK inside an SDK root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdkPaths {
    sdk_root: PathBuf,
}

/// Cross-compiler executables for a host platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub cc: PathBuf,
    pub cxx: PathBuf,
    pub ar: PathBuf,
    pub ranlib: PathBuf,
    /// Assembling goes through the C driver as well
    pub assembler: PathBuf,
}

impl NdkPaths {
    /// Create the path layout for an SDK root
    pub fn new(sdk_root: impl Into<PathBuf>) -> Self {
        Self {
            sdk_root: sdk_root.into(),
        }
    }

    /// The SDK root this layout hangs off
    pub fn sdk_root(&self) -> &Path {
        &self.sdk_root
    }

    /// Root of the pinned NDK release
    pub fn ndk_root(&self) -> PathBuf {
        self.sdk_root.join("ndk").join(NDK_VERSION)
    }

    /// Whether the pinned NDK release is present on disk
    pub fn is_installed(&self) -> bool {
        self.ndk_root().exists()
    }

    /// Directory holding the cross-compiler executables for a host
    pub fn toolchain_bin(&self, host: HostPlatform) -> PathBuf {
        self.ndk_root()
            .join("toolchains")
            .join("llvm")
            .join("prebuilt")
            .join(host.tag())
            .join("bin")
    }

    /// Cross-compiler executables for a host
    pub fn toolchain(&self, host: HostPlatform) -> Toolchain {
        let bin = self.toolchain_bin(host);
        Toolchain {
            cc: bin.join("clang"),
            cxx: bin.join("clang++"),
            ar: bin.join("llvm-ar"),
            ranlib: bin.join("llvm-ranlib"),
            assembler: bin.join("clang"),
        }
    }
}
