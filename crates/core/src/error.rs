//! Error types for DroidForge
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for DroidForge
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("ANDROID_SDK_ROOT is not set or does not point to a directory")]
    SdkRootNotSet,
}

/// Result type alias for DroidForge operations
pub type Result<T> = std::result::Result<T, ForgeError>;

impl ForgeError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ForgeError::Io(e) => format!("File operation failed: {}", e),
            ForgeError::Config(msg) => format!("Configuration error: {}", msg),
            ForgeError::SdkRootNotSet => {
                "ANDROID_SDK_ROOT must point to an Android SDK installation".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let message = ForgeError::SdkRootNotSet.user_message();
        assert!(message.contains("ANDROID_SDK_ROOT"));

        let err = ForgeError::Config("unknown build option \"optimize\"".to_string());
        assert!(err.user_message().contains("unknown build option"));
    }
}
