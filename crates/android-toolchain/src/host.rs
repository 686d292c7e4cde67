//! Host platform detection
//!
//! The NDK ships one prebuilt LLVM toolchain per host OS; picking the
//! right subdirectory requires knowing which host is running the build.

use thiserror::Error;

/// Host platform errors
#[derive(Debug, Error)]
pub enum HostPlatformError {
    #[error("unrecognized host platform \"{0}\", no NDK prebuilt toolchain exists for it")]
    Unrecognized(String),
}

/// Host operating system running the build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Linux,
    MacOs,
    Windows64,
    Windows32,
}

impl HostPlatform {
    /// Detect the current host
    pub fn current() -> Result<Self, HostPlatformError> {
        Self::from_parts(std::env::consts::OS, cfg!(target_pointer_width = "64"))
    }

    /// Resolve a host platform from an OS token and word size
    pub fn from_parts(os: &str, is_64bit: bool) -> Result<Self, HostPlatformError> {
        match os {
            "linux" => Ok(HostPlatform::Linux),
            "macos" => Ok(HostPlatform::MacOs),
            "windows" if is_64bit => Ok(HostPlatform::Windows64),
            "windows" => Ok(HostPlatform::Windows32),
            other => Err(HostPlatformError::Unrecognized(other.to_string())),
        }
    }

    /// NDK prebuilt toolchain directory name for this host
    pub fn tag(&self) -> &'static str {
        match self {
            HostPlatform::Linux => "linux-x86_64",
            HostPlatform::MacOs => "darwin-x86_64",
            HostPlatform::Windows64 => "windows-x86_64",
            HostPlatform::Windows32 => "windows",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        assert_eq!(HostPlatform::Linux.tag(), "linux-x86_64");
        assert_eq!(HostPlatform::MacOs.tag(), "darwin-x86_64");
        assert_eq!(HostPlatform::Windows64.tag(), "windows-x86_64");
        assert_eq!(HostPlatform::Windows32.tag(), "windows");
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(
            HostPlatform::from_parts("linux", true).unwrap(),
            HostPlatform::Linux
        );
        assert_eq!(
            HostPlatform::from_parts("windows", false).unwrap(),
            HostPlatform::Windows32
        );

        let err = HostPlatform::from_parts("freebsd", true).unwrap_err();
        assert!(err.to_string().contains("freebsd"));
    }

    #[test]
    fn test_current_host_is_recognized() {
        HostPlatform::current().unwrap();
    }
}
