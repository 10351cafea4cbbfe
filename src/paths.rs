//! XDG-style path utilities for configuration and cache directories.
//!
//! Prefers XDG Base Directory conventions over OS-specific locations so the
//! same layout is used on every platform.

use std::path::PathBuf;

const APP_DIR: &str = "langtutor";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/langtutor` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/langtutor` otherwise
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| home_dir().join(".config").join(APP_DIR),
        |xdg| PathBuf::from(xdg).join(APP_DIR),
    )
}

/// Returns the default translation cache directory.
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/langtutor` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/langtutor` otherwise
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn cache_dir() -> PathBuf {
    std::env::var("XDG_CACHE_HOME").map_or_else(
        |_| home_dir().join(".cache").join(APP_DIR),
        |xdg| PathBuf::from(xdg).join(APP_DIR),
    )
}

#[allow(clippy::expect_used)]
fn home_dir() -> PathBuf {
    dirs::home_dir().expect("Failed to determine home directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_env<F: FnOnce()>(key: &str, value: Option<&str>, f: F) {
        let original = std::env::var(key).ok();
        match value {
            Some(v) => unsafe { std::env::set_var(key, v) },
            None => unsafe { std::env::remove_var(key) },
        }

        f();

        match original {
            Some(v) => unsafe { std::env::set_var(key, v) },
            None => unsafe { std::env::remove_var(key) },
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_default() {
        with_env("XDG_CONFIG_HOME", None, || {
            assert!(config_dir().ends_with(".config/langtutor"));
        });
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        with_env("XDG_CONFIG_HOME", Some("/custom/config"), || {
            assert_eq!(config_dir(), PathBuf::from("/custom/config/langtutor"));
        });
    }

    #[test]
    #[serial]
    fn test_cache_dir_default() {
        with_env("XDG_CACHE_HOME", None, || {
            assert!(cache_dir().ends_with(".cache/langtutor"));
        });
    }

    #[test]
    #[serial]
    fn test_cache_dir_xdg_override() {
        with_env("XDG_CACHE_HOME", Some("/custom/cache"), || {
            assert_eq!(cache_dir(), PathBuf::from("/custom/cache/langtutor"));
        });
    }
}
