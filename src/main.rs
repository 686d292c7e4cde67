//! DroidForge - Android toolchain resolution and flag synthesis
//!
//! Main entry point that collects build options from the options file,
//! the environment and `key=value` arguments, then resolves and emits
//! the build plan.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use droidforge::commands::{CheckCommand, ConfigureCommand, EmitFormat};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "DroidForge";

const USAGE: &str = "\
DroidForge - Android toolchain and build flag resolution

Usage:
  droidforge [configure] [key=value ...] [--options=FILE] [--emit=json|exports]
  droidforge check [key=value ...] [--options=FILE]

Commands:
  configure          Resolve the toolchain and emit the build plan (default)
  check              Report SDK/NDK status without installing anything

Build options (key=value):
  ANDROID_SDK_ROOT   Path to the Android SDK
  arch               Target CPU architecture (x86_32, x86_64, arm32, arm64)
  ndk_platform       Target platform (android-<api>, e.g. android-24)
  lto                Link-time optimization (none, auto, thin, full)
  vulkan             Enable the Vulkan renderer (yes/no)
  use_volk           Load Vulkan through volk instead of linking it (yes/no)
  editor_build       Editor build; template builds disable C++ exceptions (yes/no)

Flags:
  --options=FILE     Options file to read (default: droidforge.toml)
  --emit=FORMAT      Output format: json (default) or exports
  -h, --help         Show this help
";

enum Invocation {
    Configure(ConfigureCommand),
    Check(CheckCommand),
    Help,
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for the emitted plan
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&args)? {
        Invocation::Help => {
            print!("{}", USAGE);
            Ok(())
        }
        Invocation::Configure(cmd) => {
            info!("{} v{}", APP_NAME, VERSION);
            cmd.execute().await
        }
        Invocation::Check(cmd) => cmd.execute().await,
    }
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut subcommand: Option<&str> = None;
    let mut options_file = None;
    let mut emit = EmitFormat::default();
    let mut overrides = Vec::new();

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Ok(Invocation::Help);
        } else if let Some(value) = arg.strip_prefix("--options=") {
            options_file = Some(PathBuf::from(value));
        } else if let Some(value) = arg.strip_prefix("--emit=") {
            emit = EmitFormat::parse(value)?;
        } else if arg.starts_with("--") {
            anyhow::bail!("unknown flag \"{}\", try --help", arg);
        } else if let Some((key, value)) = arg.split_once('=') {
            overrides.push((key.to_string(), value.to_string()));
        } else if subcommand.is_none() {
            subcommand = Some(arg.as_str());
        } else {
            anyhow::bail!("unexpected argument \"{}\"", arg);
        }
    }

    match subcommand.unwrap_or("configure") {
        "configure" => Ok(Invocation::Configure(ConfigureCommand {
            options_file,
            overrides,
            emit,
        })),
        "check" => Ok(Invocation::Check(CheckCommand {
            options_file,
            overrides,
        })),
        other => anyhow::bail!("unknown command \"{}\", try --help", other),
    }
}
