//! Build options
//!
//! The raw option surface as users supply it, before any validation:
//! an options file (TOML), environment variables, and SCons-style
//! `key=value` pairs on the command line.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ForgeError, Result};

/// Raw build options, prior to validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Path to the Android SDK; falls back to `ANDROID_SDK_ROOT` when unset
    pub sdk_root: Option<PathBuf>,
    /// Target CPU architecture (x86_32, x86_64, arm32, arm64)
    pub arch: String,
    /// Target platform (android-<api>, e.g. "android-24")
    pub ndk_platform: String,
    /// Link-time optimization mode (none, auto, thin, full)
    pub lto: String,
    /// Enable the Vulkan renderer
    pub vulkan: bool,
    /// Load Vulkan entry points through volk instead of linking libvulkan
    pub use_volk: bool,
    /// Editor build; template builds disable C++ exceptions
    pub editor_build: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            sdk_root: None,
            // Default for convenience.
            arch: "arm64".to_string(),
            ndk_platform: "android-24".to_string(),
            lto: "auto".to_string(),
            vulkan: true,
            use_volk: false,
            editor_build: false,
        }
    }
}

impl BuildOptions {
    /// Load options from a TOML file, falling back to defaults when the
    /// file does not exist
    pub async fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading build options from {:?}", path);
            let contents = tokio::fs::read_to_string(path).await?;
            let options: BuildOptions = toml::from_str(&contents)?;
            Ok(options)
        } else {
            info!("Options file {:?} not found, using defaults", path);
            Ok(BuildOptions::default())
        }
    }

    /// Save options to a TOML file
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        debug!("Build options saved to {:?}", path);
        Ok(())
    }

    /// Apply `DROIDFORGE_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides through an environment lookup
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(arch) = lookup("DROIDFORGE_ARCH") {
            self.arch = arch;
        }
        if let Some(platform) = lookup("DROIDFORGE_PLATFORM") {
            self.ndk_platform = platform;
        }
        if let Some(lto) = lookup("DROIDFORGE_LTO") {
            self.lto = lto;
        }
        if let Some(vulkan) = lookup("DROIDFORGE_VULKAN") {
            self.vulkan = parse_bool(&vulkan)?;
        }
        if let Some(use_volk) = lookup("DROIDFORGE_USE_VOLK") {
            self.use_volk = parse_bool(&use_volk)?;
        }
        if let Some(editor) = lookup("DROIDFORGE_EDITOR_BUILD") {
            self.editor_build = parse_bool(&editor)?;
        }
        Ok(())
    }

    /// Apply a single `key=value` override from the command line
    pub fn apply_pair(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "ANDROID_SDK_ROOT" => self.sdk_root = Some(PathBuf::from(value)),
            "arch" => self.arch = value.to_string(),
            "ndk_platform" => self.ndk_platform = value.to_string(),
            "lto" => self.lto = value.to_string(),
            "vulkan" => self.vulkan = parse_bool(value)?,
            "use_volk" => self.use_volk = parse_bool(value)?,
            "editor_build" => self.editor_build = parse_bool(value)?,
            _ => {
                return Err(ForgeError::Config(format!(
                    "unknown build option \"{}\"",
                    key
                )))
            }
        }
        Ok(())
    }

    /// Get the SDK root, falling back to `ANDROID_SDK_ROOT`
    pub fn sdk_root(&self) -> Option<PathBuf> {
        self.sdk_root
            .clone()
            .or_else(|| std::env::var_os("ANDROID_SDK_ROOT").map(PathBuf::from))
    }

    /// Get the SDK root, requiring it to name an existing directory
    pub fn require_sdk_root(&self) -> Result<PathBuf> {
        match self.sdk_root() {
            Some(root) if root.is_dir() => Ok(root),
            _ => Err(ForgeError::SdkRootNotSet),
        }
    }

    /// Whether an Android build can proceed at all
    pub fn can_build(&self) -> bool {
        self.require_sdk_root().is_ok()
    }
}

/// Parse a boolean option value
pub fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" => Ok(false),
        _ => Err(ForgeError::Config(format!(
            "invalid boolean \"{}\", expected yes/no, true/false or 1/0",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let options = BuildOptions::default();
        assert_eq!(options.arch, "arm64");
        assert_eq!(options.ndk_platform, "android-24");
        assert_eq!(options.lto, "auto");
        assert!(options.vulkan);
        assert!(!options.use_volk);
        assert!(!options.editor_build);
        assert_eq!(options.sdk_root, None);
    }

    #[test]
    fn test_apply_pair() {
        let mut options = BuildOptions::default();
        options.apply_pair("arch", "x86_64").unwrap();
        options.apply_pair("ndk_platform", "android-29").unwrap();
        options.apply_pair("vulkan", "no").unwrap();
        options.apply_pair("ANDROID_SDK_ROOT", "/opt/android-sdk").unwrap();

        assert_eq!(options.arch, "x86_64");
        assert_eq!(options.ndk_platform, "android-29");
        assert!(!options.vulkan);
        assert_eq!(options.sdk_root, Some(PathBuf::from("/opt/android-sdk")));
    }

    #[test]
    fn test_apply_pair_unknown_key() {
        let mut options = BuildOptions::default();
        let err = options.apply_pair("optimize", "speed").unwrap_err();
        assert!(err.to_string().contains("unknown build option"));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("yes").unwrap());
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("no").unwrap());
        assert!(!parse_bool("false").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut env = HashMap::new();
        env.insert("DROIDFORGE_ARCH".to_string(), "arm32".to_string());
        env.insert("DROIDFORGE_EDITOR_BUILD".to_string(), "yes".to_string());

        let mut options = BuildOptions::default();
        options.apply_env_from(|key| env.get(key).cloned()).unwrap();

        assert_eq!(options.arch, "arm32");
        assert!(options.editor_build);
        assert_eq!(options.ndk_platform, "android-24");
    }

    #[test]
    fn test_toml_round_trip() {
        let mut options = BuildOptions::default();
        options.arch = "x86_32".to_string();
        options.use_volk = true;

        let text = toml::to_string_pretty(&options).unwrap();
        let parsed: BuildOptions = toml::from_str(&text).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_partial_options_file() {
        let parsed: BuildOptions = toml::from_str("arch = \"x86_64\"\n").unwrap();
        assert_eq!(parsed.arch, "x86_64");
        assert_eq!(parsed.ndk_platform, "android-24");
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let options = BuildOptions::load(&dir.path().join("droidforge.toml"))
            .await
            .unwrap();
        assert_eq!(options, BuildOptions::default());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("droidforge.toml");

        let mut options = BuildOptions::default();
        options.arch = "arm32".to_string();
        options.lto = "thin".to_string();
        options.save(&path).await.unwrap();

        let loaded = BuildOptions::load(&path).await.unwrap();
        assert_eq!(loaded, options);
    }

    #[test]
    fn test_require_sdk_root() {
        let dir = tempfile::tempdir().unwrap();

        let mut options = BuildOptions::default();
        options.sdk_root = Some(dir.path().to_path_buf());
        assert_eq!(options.require_sdk_root().unwrap(), dir.path());
        assert!(options.can_build());

        options.sdk_root = Some(dir.path().join("missing"));
        assert!(matches!(
            options.require_sdk_root(),
            Err(ForgeError::SdkRootNotSet)
        ));
    }
}
