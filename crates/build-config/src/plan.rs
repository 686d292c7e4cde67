//! Resolved build plan
//!
//! The immutable output of flag synthesis: toolchain executables plus
//! the complete flag, definition and library sets for one configuration.

use std::path::PathBuf;

use serde::Serialize;

/// A preprocessor definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Define {
    pub name: String,
    pub value: Option<String>,
}

impl Define {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Render as a compiler argument
    pub fn as_flag(&self) -> String {
        match &self.value {
            Some(value) => format!("-D{}={}", self.name, value),
            None => format!("-D{}", self.name),
        }
    }
}

/// Complete toolchain and flag set for one build configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBuildPlan {
    /// Target triple including the API level, e.g. "aarch64-linux-android24"
    pub triple: String,
    /// C compiler
    pub cc: PathBuf,
    /// C++ compiler
    pub cxx: PathBuf,
    /// Static archiver
    pub ar: PathBuf,
    /// Archive indexer
    pub ranlib: PathBuf,
    /// Assembler; assembling goes through the C driver
    pub assembler: PathBuf,
    /// Flags shared by C and C++ compilation
    pub cflags: Vec<String>,
    /// Flags applied to C++ compilation on top of `cflags`
    pub cxxflags: Vec<String>,
    /// Assembler flags
    pub asflags: Vec<String>,
    /// Linker flags
    pub ldflags: Vec<String>,
    /// Preprocessor definitions
    pub defines: Vec<Define>,
    /// Libraries to link against
    pub link_libs: Vec<String>,
    /// Suffix for the produced shared library
    pub shared_lib_suffix: &'static str,
}

impl ResolvedBuildPlan {
    /// Whether a definition with this name is present
    pub fn has_define(&self, name: &str) -> bool {
        self.defines.iter().any(|define| define.name == name)
    }

    /// Whether a library is linked
    pub fn links(&self, lib: &str) -> bool {
        self.link_libs.iter().any(|linked| linked == lib)
    }
}
