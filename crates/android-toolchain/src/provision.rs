//! NDK provisioning
//!
//! Ensures the pinned NDK release exists under the SDK root, installing
//! it through the SDK's `sdkmanager` when it is missing.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

use crate::ndk::NdkPaths;
use crate::NDK_VERSION;

/// Provisioning errors
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error(
        "Cannot find {}\nPlease ensure ANDROID_SDK_ROOT is correct and cmdline-tools are installed, or install NDK version {} manually.",
        .installer.display(),
        .version
    )]
    InstallerNotFound {
        installer: PathBuf,
        version: &'static str,
    },

    #[error("sdkmanager exited with {} while installing \"ndk;{}\"", .status, .version)]
    InstallFailed {
        version: &'static str,
        status: std::process::ExitStatus,
    },

    #[error("NDK {} still missing at {} after installation", .version, .path.display())]
    MissingAfterInstall {
        version: &'static str,
        path: PathBuf,
    },

    #[error("NDK {} is not installed at {}", .version, .path.display())]
    NotInstalled {
        version: &'static str,
        path: PathBuf,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Strategy for making the pinned NDK available under an SDK root
#[async_trait]
pub trait NdkProvider: Send + Sync {
    /// Ensure the pinned NDK exists under `sdk_root`, returning its root
    async fn ensure_ndk(&self, sdk_root: &Path) -> Result<PathBuf, ProvisionError>;
}

/// Installs the pinned NDK through `sdkmanager` when it is missing
#[derive(Debug, Default)]
pub struct SdkManagerInstaller;

impl SdkManagerInstaller {
    /// Create a new installer
    pub fn new() -> Self {
        Self
    }

    /// Expected `sdkmanager` location under an SDK root
    pub fn expected_installer(sdk_root: &Path) -> PathBuf {
        sdk_root
            .join("cmdline-tools")
            .join("latest")
            .join("bin")
            .join(Self::installer_name())
    }

    fn installer_name() -> &'static str {
        if cfg!(windows) {
            "sdkmanager.bat"
        } else {
            "sdkmanager"
        }
    }

    /// Locate `sdkmanager`, accepting versioned and legacy layouts too
    fn find_installer(sdk_root: &Path) -> Option<PathBuf> {
        let latest = Self::expected_installer(sdk_root);
        if latest.exists() {
            return Some(latest);
        }

        // Versioned cmdline-tools/X.Y directories
        let cmdline_tools = sdk_root.join("cmdline-tools");
        if let Ok(entries) = std::fs::read_dir(&cmdline_tools) {
            for entry in entries.flatten() {
                let candidate = entry.path().join("bin").join(Self::installer_name());
                if candidate.exists() {
                    return Some(candidate);
                }
            }
        }

        // Legacy tools directory
        let legacy = sdk_root
            .join("tools")
            .join("bin")
            .join(Self::installer_name());
        if legacy.exists() {
            return Some(legacy);
        }

        None
    }

    async fn run_installer(installer: &Path, sdk_root: &Path) -> Result<(), ProvisionError> {
        let package = format!("ndk;{}", NDK_VERSION);
        info!("Installing Android NDK...");

        let mut child = Command::new(installer)
            .arg(&package)
            .env("ANDROID_SDK_ROOT", sdk_root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Accept license prompts
        if let Some(mut stdin) = child.stdin.take() {
            for _ in 0..10 {
                stdin.write_all(b"y\n").await?;
            }
        }

        if let Some(stdout) = child.stdout.take() {
            let reader = BufReader::new(stdout);
            let mut lines = reader.lines();

            while let Ok(Some(line)) = lines.next_line().await {
                debug!("sdkmanager: {}", line);
            }
        }

        let status = child.wait().await?;

        if !status.success() {
            return Err(ProvisionError::InstallFailed {
                version: NDK_VERSION,
                status,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl NdkProvider for SdkManagerInstaller {
    async fn ensure_ndk(&self, sdk_root: &Path) -> Result<PathBuf, ProvisionError> {
        info!("Checking for Android NDK...");

        let ndk_root = NdkPaths::new(sdk_root).ndk_root();
        if ndk_root.exists() {
            debug!("Found NDK {} at {:?}", NDK_VERSION, ndk_root);
            return Ok(ndk_root);
        }

        let installer =
            Self::find_installer(sdk_root).ok_or_else(|| ProvisionError::InstallerNotFound {
                installer: Self::expected_installer(sdk_root),
                version: NDK_VERSION,
            })?;

        Self::run_installer(&installer, sdk_root).await?;

        if !ndk_root.exists() {
            return Err(ProvisionError::MissingAfterInstall {
                version: NDK_VERSION,
                path: ndk_root,
            });
        }

        info!("NDK {} installed at {:?}", NDK_VERSION, ndk_root);
        Ok(ndk_root)
    }
}

/// Verifies a caller-managed NDK, never spawning an installer
#[derive(Debug, Default)]
pub struct PreinstalledNdk;

#[async_trait]
impl NdkProvider for PreinstalledNdk {
    async fn ensure_ndk(&self, sdk_root: &Path) -> Result<PathBuf, ProvisionError> {
        let ndk_root = NdkPaths::new(sdk_root).ndk_root();
        if ndk_root.exists() {
            Ok(ndk_root)
        } else {
            Err(ProvisionError::NotInstalled {
                version: NDK_VERSION,
                path: ndk_root,
            })
        }
    }
}
