//! Build configuration
//!
//! Validation of raw build options into a normalized configuration.
//! Everything fatal about a request is caught here, before any
//! provisioning or synthesis happens.

use std::str::FromStr;

use droidforge_core::BuildOptions;
use tracing::warn;

/// 64-bit code needs at least this platform level
const MIN_API_FOR_64BIT: u32 = 21;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Unsupported CPU architecture \"{0}\" for Android. Supported architectures are: x86_32, x86_64, arm32, arm64."
    )]
    UnsupportedArchitecture(String),

    #[error("Invalid ndk_platform \"{0}\". Expected \"android-<api>\" with a positive API level.")]
    InvalidPlatform(String),

    #[error("Invalid lto mode \"{0}\". Allowed values are: none, auto, thin, full.")]
    InvalidLtoMode(String),
}

/// Target CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86_32,
    X86_64,
    Arm32,
    Arm64,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_32 => "x86_32",
            Arch::X86_64 => "x86_64",
            Arch::Arm32 => "arm32",
            Arch::Arm64 => "arm64",
        }
    }

    /// Target triple prefix; the API level gets appended to form the
    /// full `-target` value
    pub fn triple_prefix(&self) -> &'static str {
        match self {
            Arch::X86_32 => "i686-linux-android",
            Arch::X86_64 => "x86_64-linux-android",
            Arch::Arm32 => "armv7a-linux-androideabi",
            Arch::Arm64 => "aarch64-linux-android",
        }
    }

    pub fn is_64bit(&self) -> bool {
        matches!(self, Arch::X86_64 | Arch::Arm64)
    }

    /// All supported architectures
    pub fn all() -> &'static [Arch] {
        &[Arch::X86_32, Arch::X86_64, Arch::Arm32, Arch::Arm64]
    }
}

impl FromStr for Arch {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_32" => Ok(Arch::X86_32),
            "x86_64" => Ok(Arch::X86_64),
            "arm32" => Ok(Arch::Arm32),
            "arm64" => Ok(Arch::Arm64),
            other => Err(ConfigError::UnsupportedArchitecture(other.to_string())),
        }
    }
}

/// Link-time optimization mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LtoMode {
    None,
    Auto,
    Thin,
    Full,
}

impl LtoMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LtoMode::None => "none",
            LtoMode::Auto => "auto",
            LtoMode::Thin => "thin",
            LtoMode::Full => "full",
        }
    }
}

impl FromStr for LtoMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(LtoMode::None),
            "auto" => Ok(LtoMode::Auto),
            "thin" => Ok(LtoMode::Thin),
            "full" => Ok(LtoMode::Full),
            other => Err(ConfigError::InvalidLtoMode(other.to_string())),
        }
    }
}

/// Validated, normalized build configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub arch: Arch,
    /// Minimum platform API level; at least 21 for 64-bit architectures
    pub api_level: u32,
    /// Never `Auto` after validation
    pub lto: LtoMode,
    pub vulkan: bool,
    pub use_volk: bool,
    pub editor_build: bool,
}

impl BuildConfig {
    /// Validate raw options into a normalized configuration
    pub fn from_options(options: &BuildOptions) -> Result<Self, ConfigError> {
        let arch: Arch = options.arch.parse()?;
        let mut api_level = parse_api_level(&options.ndk_platform)?;

        if api_level < MIN_API_FOR_64BIT && arch.is_64bit() {
            warn!(
                "arch=\"{}\" is not supported with \"ndk_platform\" lower than \"android-21\". Forcing platform 21.",
                arch.as_str()
            );
            api_level = MIN_API_FOR_64BIT;
        }

        let mut lto: LtoMode = options.lto.parse()?;
        if lto == LtoMode::Auto {
            // LTO benefits for Android (size, performance) haven't been
            // clearly established yet.
            lto = LtoMode::None;
        }

        Ok(Self {
            arch,
            api_level,
            lto,
            vulkan: options.vulkan,
            use_volk: options.use_volk,
            editor_build: options.editor_build,
        })
    }

    /// The normalized platform string, e.g. "android-21"
    pub fn ndk_platform(&self) -> String {
        format!("android-{}", self.api_level)
    }

    /// Full target triple including the API level
    pub fn target_triple(&self) -> String {
        format!("{}{}", self.arch.triple_prefix(), self.api_level)
    }

    /// Raw options equivalent to this configuration
    pub fn to_options(&self) -> BuildOptions {
        BuildOptions {
            sdk_root: None,
            arch: self.arch.as_str().to_string(),
            ndk_platform: self.ndk_platform(),
            lto: self.lto.as_str().to_string(),
            vulkan: self.vulkan,
            use_volk: self.use_volk,
            editor_build: self.editor_build,
        }
    }
}

fn parse_api_level(platform: &str) -> Result<u32, ConfigError> {
    platform
        .strip_prefix("android-")
        .and_then(|suffix| suffix.parse::<u32>().ok())
        .filter(|api| *api > 0)
        .ok_or_else(|| ConfigError::InvalidPlatform(platform.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(arch: &str, platform: &str) -> BuildOptions {
        BuildOptions {
            arch: arch.to_string(),
            ndk_platform: platform.to_string(),
            ..BuildOptions::default()
        }
    }

    #[test]
    fn test_arch_parsing() {
        for arch in Arch::all() {
            assert_eq!(arch.as_str().parse::<Arch>().unwrap(), *arch);
        }
    }

    #[test]
    fn test_unsupported_arch_lists_supported_values() {
        let err = BuildConfig::from_options(&options("mips", "android-24")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedArchitecture(_)));

        let message = err.to_string();
        for supported in ["x86_32", "x86_64", "arm32", "arm64"] {
            assert!(message.contains(supported));
        }
    }

    #[test]
    fn test_invalid_platform() {
        for platform in ["24", "android-", "android-abc", "android-0", ""] {
            let err = BuildConfig::from_options(&options("arm64", platform)).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidPlatform(_)), "{}", platform);
        }
    }

    #[test]
    fn test_invalid_lto_mode() {
        let mut opts = options("arm64", "android-24");
        opts.lto = "fat".to_string();
        let err = BuildConfig::from_options(&opts).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLtoMode(_)));
    }

    #[test]
    fn test_auto_lto_falls_back_to_none() {
        let config = BuildConfig::from_options(&options("arm64", "android-24")).unwrap();
        assert_eq!(config.lto, LtoMode::None);
    }

    #[test]
    fn test_explicit_lto_is_kept() {
        let mut opts = options("arm64", "android-24");
        opts.lto = "thin".to_string();
        let config = BuildConfig::from_options(&opts).unwrap();
        assert_eq!(config.lto, LtoMode::Thin);
    }

    #[test]
    fn test_64bit_api_floor() {
        let config = BuildConfig::from_options(&options("arm64", "android-19")).unwrap();
        assert_eq!(config.api_level, 21);
        assert_eq!(config.ndk_platform(), "android-21");

        let config = BuildConfig::from_options(&options("x86_64", "android-16")).unwrap();
        assert_eq!(config.api_level, 21);
    }

    #[test]
    fn test_32bit_arch_keeps_low_api() {
        let config = BuildConfig::from_options(&options("arm32", "android-19")).unwrap();
        assert_eq!(config.api_level, 19);
        assert_eq!(config.ndk_platform(), "android-19");
    }

    #[test]
    fn test_api_at_floor_is_untouched() {
        let config = BuildConfig::from_options(&options("arm64", "android-21")).unwrap();
        assert_eq!(config.api_level, 21);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut opts = options("x86_64", "android-19");
        opts.lto = "auto".to_string();
        opts.use_volk = true;

        let first = BuildConfig::from_options(&opts).unwrap();
        let second = BuildConfig::from_options(&first.to_options()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_target_triple() {
        let config = BuildConfig::from_options(&options("arm64", "android-24")).unwrap();
        assert_eq!(config.target_triple(), "aarch64-linux-android24");

        let config = BuildConfig::from_options(&options("arm32", "android-21")).unwrap();
        assert_eq!(config.target_triple(), "armv7a-linux-androideabi21");

        let config = BuildConfig::from_options(&options("x86_32", "android-24")).unwrap();
        assert_eq!(config.target_triple(), "i686-linux-android24");

        let config = BuildConfig::from_options(&options("x86_64", "android-24")).unwrap();
        assert_eq!(config.target_triple(), "x86_64-linux-android24");
    }
}
