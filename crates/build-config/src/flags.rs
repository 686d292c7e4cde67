//! Flag synthesis
//!
//! Turns a validated configuration plus the resolved NDK layout into the
//! complete compiler, assembler and linker invocation set.

use droidforge_android_toolchain::{HostPlatform, NdkPaths};

use crate::config::{Arch, BuildConfig, LtoMode};
use crate::plan::{Define, ResolvedBuildPlan};
use crate::{OUTPUT_SONAME, SHARED_LIB_SUFFIX};

/// Flags shared by every compilation regardless of configuration
const BASE_CFLAGS: [&str; 6] = [
    "-fpic",
    "-ffunction-sections",
    "-funwind-tables",
    "-fstack-protector-strong",
    "-fvisibility=hidden",
    "-fno-strict-aliasing",
];

const FIXED_LDFLAGS: [&str; 3] = ["-Wl,--gc-sections", "-Wl,--no-undefined", "-Wl,-z,now"];

const PLATFORM_LIBS: [&str; 7] = ["OpenSLES", "EGL", "GLESv2", "android", "log", "z", "dl"];

/// Synthesize the complete build plan for a validated configuration.
///
/// Pure and infallible: equal inputs produce equal plans, and every
/// failure mode belongs to validation, provisioning or host detection,
/// all of which run before this.
pub fn synthesize(config: &BuildConfig, ndk: &NdkPaths, host: HostPlatform) -> ResolvedBuildPlan {
    let triple = config.target_triple();
    let tools = ndk.toolchain(host);

    // The assembler, compiler and linker all receive the same -target value.
    let mut cflags = vec!["-target".to_string(), triple.clone()];
    let mut asflags = vec!["-target".to_string(), triple.clone(), "-c".to_string()];
    let mut ldflags = vec!["-target".to_string(), triple.clone()];
    let mut cxxflags: Vec<String> = Vec::new();
    let mut defines: Vec<Define> = Vec::new();
    let mut link_libs: Vec<String> = Vec::new();

    cflags.extend(BASE_CFLAGS.iter().map(|flag| flag.to_string()));

    // Disable exceptions on template builds.
    if !config.editor_build {
        cxxflags.push("-fno-exceptions".to_string());
    }

    match config.lto {
        LtoMode::Thin => {
            cflags.push("-flto=thin".to_string());
            ldflags.push("-flto=thin".to_string());
        }
        LtoMode::Full => {
            cflags.push("-flto".to_string());
            ldflags.push("-flto".to_string());
        }
        LtoMode::None | LtoMode::Auto => {}
    }

    match config.arch {
        Arch::X86_32 => {
            // The NDK adds this itself when targeting API levels below 24.
            cflags.push("-mstackrealign".to_string());
        }
        Arch::X86_64 => {}
        Arch::Arm32 => {
            cflags.push("-march=armv7-a".to_string());
            cflags.push("-mfloat-abi=softfp".to_string());
            defines.push(Define::new("__ARM_ARCH_7__"));
            defines.push(Define::new("__ARM_ARCH_7A__"));
            defines.push(Define::new("__ARM_NEON__"));
        }
        Arch::Arm64 => {
            cflags.push("-mfix-cortex-a53-835769".to_string());
            defines.push(Define::new("__ARM_ARCH_8A__"));
        }
    }

    if config.api_level >= 24 {
        defines.push(Define::with_value("_FILE_OFFSET_BITS", "64"));
    }

    defines.push(Define::new("GLES_ENABLED"));
    if config.vulkan {
        defines.push(Define::new("VULKAN_ENABLED"));
        if !config.use_volk {
            link_libs.push("vulkan".to_string());
        }
    }

    ldflags.extend(FIXED_LDFLAGS.iter().map(|flag| flag.to_string()));
    ldflags.push(format!("-Wl,-soname,{}", OUTPUT_SONAME));

    defines.push(Define::new("ANDROID_ENABLED"));
    defines.push(Define::new("UNIX_ENABLED"));
    link_libs.extend(PLATFORM_LIBS.iter().map(|lib| lib.to_string()));

    ResolvedBuildPlan {
        triple,
        cc: tools.cc,
        cxx: tools.cxx,
        ar: tools.ar,
        ranlib: tools.ranlib,
        assembler: tools.assembler,
        cflags,
        cxxflags,
        asflags,
        ldflags,
        defines,
        link_libs,
        shared_lib_suffix: SHARED_LIB_SUFFIX,
    }
}
