//! Build environment application
//!
//! Applies a resolved plan to a set of environment variables the way a
//! make-style build graph consumes them. Tool variables are assigned,
//! flag variables are appended so the caller's own flags survive.

use std::collections::BTreeMap;

use tracing::debug;

use crate::plan::ResolvedBuildPlan;

/// Environment variables owned by the calling build graph
#[derive(Debug, Clone, Default)]
pub struct BuildEnv {
    vars: BTreeMap<String, String>,
}

impl BuildEnv {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of variables
    pub fn with_base<I, K, V>(base: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: base
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Apply a resolved plan.
    ///
    /// `CXXFLAGS` receives the shared compile flags plus the C++-only
    /// additions. Definitions render into `CPPFLAGS`, libraries into
    /// `LDLIBS`, and the shared-library suffix lands in `SHLIBSUFFIX`.
    pub fn apply(&mut self, plan: &ResolvedBuildPlan) {
        self.set("CC", plan.cc.to_string_lossy());
        self.set("CXX", plan.cxx.to_string_lossy());
        self.set("AS", plan.assembler.to_string_lossy());
        self.set("AR", plan.ar.to_string_lossy());
        self.set("RANLIB", plan.ranlib.to_string_lossy());
        self.set("SHLIBSUFFIX", plan.shared_lib_suffix);

        self.append("CFLAGS", plan.cflags.join(" "));

        let mut cxxflags = plan.cflags.clone();
        cxxflags.extend(plan.cxxflags.iter().cloned());
        self.append("CXXFLAGS", cxxflags.join(" "));

        self.append("ASFLAGS", plan.asflags.join(" "));
        self.append("LDFLAGS", plan.ldflags.join(" "));

        let defines: Vec<String> = plan.defines.iter().map(|d| d.as_flag()).collect();
        self.append("CPPFLAGS", defines.join(" "));

        let libs: Vec<String> = plan
            .link_libs
            .iter()
            .map(|lib| format!("-l{}", lib))
            .collect();
        self.append("LDLIBS", libs.join(" "));

        debug!("Applied build plan for {} to environment", plan.triple);
    }

    /// Set a variable, replacing any existing value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Append to a variable, preserving any existing value
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.vars.get_mut(&key) {
            Some(existing) if !existing.is_empty() => {
                existing.push(' ');
                existing.push_str(&value);
            }
            _ => {
                self.vars.insert(key, value);
            }
        }
    }

    /// Look up a variable
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// All variables, ordered by name
    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Shell export commands (for terminal display)
    pub fn shell_exports(&self) -> String {
        let mut exports = String::new();

        for (key, value) in &self.vars {
            if cfg!(windows) {
                exports.push_str(&format!("set {}={}\n", key, value));
            } else {
                exports.push_str(&format!("export {}=\"{}\"\n", key, value));
            }
        }

        exports
    }
}
