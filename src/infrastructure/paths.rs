//! Filesystem locations used by the engine and its tooling.

use std::path::PathBuf;

/// Directory name used under the platform data directory.
const APP_DIR: &str = "toaster";

/// Returns the data directory for trace files.
///
/// Resolves to the platform data directory (`~/.local/share/toaster` on
/// Linux), falling back to a `toaster` directory under the system temp
/// directory when no home is known.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| std::env::temp_dir().join(APP_DIR), |dir| dir.join(APP_DIR))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and all paths when the home directory is
/// unknown, are returned unchanged.
///
/// # Examples
///
/// ```
/// use toaster::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/etc/toaster.toml").to_str(), Some("/etc/toaster.toml"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_namespaced() {
        assert!(data_dir().ends_with(APP_DIR));
    }

    #[test]
    fn expands_only_leading_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("rel/~/path"), PathBuf::from("rel/~/path"));
        assert_eq!(expand_tilde("~user/x"), PathBuf::from("~user/x"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), home);
            assert_eq!(expand_tilde("~/themes/dark.toml"), home.join("themes/dark.toml"));
        }
    }
}
