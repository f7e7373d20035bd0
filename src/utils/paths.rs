//! Platform locations for the config file and the default run log

use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// Directory name used under the platform config dir and the temp dir
pub const APP_DIR_NAME: &str = "splitkey";

/// File name of the YAML config inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default config file location, e.g. `~/.config/splitkey/config.yaml` on Linux
/// or `%APPDATA%\splitkey\config.yaml` on Windows.
pub fn default_config_file() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Run log location used when no output path is configured
pub fn default_output_path() -> PathBuf {
    std::env::temp_dir().join(APP_DIR_NAME)
}

/// Current user's home directory, if one can be resolved
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Expand a leading `$HOME` or `~` against `home`.
///
/// Paths without the placeholder, and any path when `home` is `None`, are
/// returned unchanged.
pub fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(raw);
    };

    for placeholder in ["$HOME", "~"] {
        if let Some(rest) = raw.strip_prefix(placeholder) {
            if rest.is_empty() {
                return home.to_path_buf();
            }
            if let Some(rest) = rest.strip_prefix(['/', '\\']) {
                return home.join(rest);
            }
        }
    }

    PathBuf::from(raw)
}
