//! CLI commands for DroidForge
//!
//! Provides the command-line surface for automation and scripting.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use droidforge_android_toolchain::{
    HostPlatform, NdkPaths, NdkProvider, SdkManagerInstaller, NDK_VERSION,
};
use droidforge_build_config::{synthesize, BuildConfig, BuildEnv, ResolvedBuildPlan};
use droidforge_core::{BuildOptions, DEFAULT_OPTIONS_FILE, PLATFORM_NAME};

/// Output format for the resolved plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitFormat {
    /// Pretty-printed JSON for an external build graph
    #[default]
    Json,
    /// Shell export lines for direct terminal use
    Exports,
}

impl EmitFormat {
    /// Parse an `--emit` value
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "json" => Ok(EmitFormat::Json),
            "exports" => Ok(EmitFormat::Exports),
            other => anyhow::bail!(
                "unknown emit format \"{}\", expected \"json\" or \"exports\"",
                other
            ),
        }
    }
}

/// Resolve the complete build plan for a set of raw options.
///
/// The whole pipeline except option collection: validation, NDK
/// provisioning, then flag synthesis.
pub async fn resolve_plan(
    options: &BuildOptions,
    provider: &dyn NdkProvider,
    host: HostPlatform,
) -> Result<ResolvedBuildPlan> {
    let sdk_root = options.require_sdk_root()?;
    let config = BuildConfig::from_options(options)?;

    let ndk_root = provider.ensure_ndk(&sdk_root).await?;
    debug!("Using NDK at {:?}", ndk_root);

    let ndk = NdkPaths::new(sdk_root);
    Ok(synthesize(&config, &ndk, host))
}

/// Collect build options from the options file, the environment and
/// `key=value` overrides, in that order
async fn collect_options(
    options_file: &Option<PathBuf>,
    overrides: &[(String, String)],
) -> Result<BuildOptions> {
    let path = options_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OPTIONS_FILE));

    let mut options = BuildOptions::load(&path).await?;
    options.apply_env_overrides()?;
    for (key, value) in overrides {
        options.apply_pair(key, value)?;
    }

    Ok(options)
}

/// Configure command options
pub struct ConfigureCommand {
    pub options_file: Option<PathBuf>,
    pub overrides: Vec<(String, String)>,
    pub emit: EmitFormat,
}

impl ConfigureCommand {
    /// Execute the configure pipeline and emit the resolved plan
    pub async fn execute(&self) -> Result<()> {
        let options = collect_options(&self.options_file, &self.overrides).await?;

        let host = HostPlatform::current()?;
        let plan = resolve_plan(&options, &SdkManagerInstaller::new(), host).await?;

        info!("Resolved {} toolchain ({})", plan.triple, host.tag());

        match self.emit {
            EmitFormat::Json => {
                let rendered =
                    serde_json::to_string_pretty(&plan).context("serializing build plan")?;
                println!("{}", rendered);
            }
            EmitFormat::Exports => {
                let mut env = BuildEnv::new();
                env.apply(&plan);
                print!("{}", env.shell_exports());
            }
        }

        Ok(())
    }
}

/// Toolchain status command
pub struct CheckCommand {
    pub options_file: Option<PathBuf>,
    pub overrides: Vec<(String, String)>,
}

impl CheckCommand {
    /// Report SDK, NDK, installer and host status without changing anything
    pub async fn execute(&self) -> Result<()> {
        let options = collect_options(&self.options_file, &self.overrides).await?;

        println!("{} build environment status:", PLATFORM_NAME);
        println!("=================================");

        match options.require_sdk_root() {
            Ok(sdk_root) => {
                println!("✓ Android SDK: {:?}", sdk_root);

                let ndk = NdkPaths::new(&sdk_root);
                if ndk.is_installed() {
                    println!("✓ Android NDK {}: {:?}", NDK_VERSION, ndk.ndk_root());
                } else {
                    println!(
                        "✗ Android NDK {}: not installed (expected at {:?})",
                        NDK_VERSION,
                        ndk.ndk_root()
                    );
                }

                let installer = SdkManagerInstaller::expected_installer(&sdk_root);
                if installer.exists() {
                    println!("✓ sdkmanager: {:?}", installer);
                } else {
                    println!("✗ sdkmanager: not found (expected at {:?})", installer);
                }
            }
            Err(err) => {
                println!("✗ Android SDK: {}", err.user_message());
            }
        }

        match HostPlatform::current() {
            Ok(host) => println!("✓ Host platform: {}", host.tag()),
            Err(err) => println!("✗ Host platform: {}", err),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidforge_android_toolchain::PreinstalledNdk;

    fn sdk_with_ndk() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("ndk").join(NDK_VERSION)).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_resolve_plan_end_to_end() {
        let sdk = sdk_with_ndk();
        let options = BuildOptions {
            sdk_root: Some(sdk.path().to_path_buf()),
            ..BuildOptions::default()
        };

        let plan = resolve_plan(&options, &PreinstalledNdk, HostPlatform::Linux)
            .await
            .unwrap();

        assert_eq!(plan.triple, "aarch64-linux-android24");
        assert!(plan.cc.starts_with(sdk.path()));
    }

    #[tokio::test]
    async fn test_resolve_plan_requires_sdk_root() {
        let options = BuildOptions {
            sdk_root: Some(PathBuf::from("/nonexistent/droidforge-sdk")),
            ..BuildOptions::default()
        };

        let err = resolve_plan(&options, &PreinstalledNdk, HostPlatform::Linux)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ANDROID_SDK_ROOT"));
    }

    #[tokio::test]
    async fn test_resolve_plan_validates_before_provisioning() {
        // The SDK root exists but holds no NDK; a bad architecture must
        // fail validation before provisioning gets a chance to complain.
        let sdk = tempfile::tempdir().unwrap();
        let options = BuildOptions {
            sdk_root: Some(sdk.path().to_path_buf()),
            arch: "mips".to_string(),
            ..BuildOptions::default()
        };

        let err = resolve_plan(&options, &PreinstalledNdk, HostPlatform::Linux)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported CPU architecture"));
    }

    #[test]
    fn test_emit_format_parsing() {
        assert_eq!(EmitFormat::parse("json").unwrap(), EmitFormat::Json);
        assert_eq!(EmitFormat::parse("exports").unwrap(), EmitFormat::Exports);
        assert!(EmitFormat::parse("yaml").is_err());
    }

    #[tokio::test]
    async fn test_check_never_installs() {
        let dir = tempfile::tempdir().unwrap();
        let sdk_root = dir.path().join("sdk");
        std::fs::create_dir(&sdk_root).unwrap();

        // Neither the NDK nor cmdline-tools exist under this root.
        let cmd = CheckCommand {
            options_file: Some(dir.path().join("droidforge.toml")),
            overrides: vec![(
                "ANDROID_SDK_ROOT".to_string(),
                sdk_root.display().to_string(),
            )],
        };
        cmd.execute().await.unwrap();

        // Reporting must not provision anything or write the options file.
        assert!(std::fs::read_dir(&sdk_root).unwrap().next().is_none());
        assert!(!dir.path().join("droidforge.toml").exists());
    }

    #[tokio::test]
    async fn test_check_without_sdk_root() {
        let dir = tempfile::tempdir().unwrap();

        let cmd = CheckCommand {
            options_file: Some(dir.path().join("droidforge.toml")),
            overrides: vec![(
                "ANDROID_SDK_ROOT".to_string(),
                dir.path().join("missing").display().to_string(),
            )],
        };
        cmd.execute().await.unwrap();
    }
}
