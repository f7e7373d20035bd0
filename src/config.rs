//! Configuration and CLI argument handling
//!
//! Hotkeys and the output path come from a YAML file in the platform config
//! directory; the command line can point at another file or override the
//! output path.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;
use serde::Deserialize;

use crate::{
    hotkeys::{HotkeyBindings, HotkeyError},
    utils::paths,
};

/// Config file written by `--write-default-config`
pub const DEFAULT_CONFIG_YAML: &str = "\
# splitkey configuration
#
# Hotkeys are '+'-joined and case-insensitive.
# Modifiers: ctrl, shift, alt (option, mod1), super (win, cmd, mod4)
# Keys: a-z, 0-9, space, f1-f12
hotkeys:
  startpause: ctrl+shift+s
  reset: ctrl+shift+r
  split: ctrl+shift+x

# Run log location. Empty means <temp dir>/splitkey.
# A leading $HOME or ~ is expanded.
outputpath: \"\"
";

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the config directory; pass --config")]
    NoConfigDir,

    #[error("failed to read config file {path}: {source} (create one with --write-default-config)")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("config file {0} already exists")]
    AlreadyExists(PathBuf),

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tick interval must be at least 1 ms")]
    ZeroTick,
}

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "splitkey")]
#[command(about = "A hotkey-driven split timer that logs every run")]
#[command(version)]
pub struct Cli {
    /// Path to the YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run log path, overriding the config file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Console refresh interval in milliseconds
    #[arg(long, default_value = "50")]
    pub tick_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Write a default config file and exit
    #[arg(long)]
    pub write_default_config: bool,
}

impl Cli {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    /// Config file to read, falling back to the platform location
    pub fn config_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => paths::default_config_file().ok_or(ConfigError::NoConfigDir),
        }
    }

    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(Duration::from_millis(self.tick_ms))
    }
}

/// Raw hotkey strings as written in the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HotkeyConfig {
    pub startpause: String,
    pub reset: String,
    pub split: String,
}

/// Contents of the YAML config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    pub hotkeys: HotkeyConfig,
    #[serde(default)]
    pub outputpath: String,
}

impl FileConfig {
    /// Load and parse the config file at `path`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the hotkey strings into bindings
    pub fn bindings(&self) -> Result<HotkeyBindings, HotkeyError> {
        HotkeyBindings::parse(&self.hotkeys.startpause, &self.hotkeys.reset, &self.hotkeys.split)
    }
}

/// Pick the run log path: CLI override, then config file, then the temp dir.
///
/// A leading `$HOME` or `~` is expanded against `home`.
pub fn resolve_output_path(
    cli_override: Option<&str>,
    configured: &str,
    home: Option<&Path>,
) -> PathBuf {
    let raw = cli_override
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| configured.trim());

    if raw.is_empty() {
        paths::default_output_path()
    } else {
        paths::expand_home(raw, home)
    }
}

/// Write [`DEFAULT_CONFIG_YAML`] to `path`, refusing to overwrite a file
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }

    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG_YAML).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses_into_bindings() {
        let config: FileConfig = serde_yml::from_str(DEFAULT_CONFIG_YAML).unwrap();
        assert_eq!(config.outputpath, "");

        let bindings = config.bindings().unwrap();
        assert_eq!(bindings.start_pause.to_string(), "Ctrl+Shift+S");
        assert_eq!(bindings.reset.to_string(), "Ctrl+Shift+R");
        assert_eq!(bindings.split.to_string(), "Ctrl+Shift+X");
    }

    #[test]
    fn output_path_is_optional() {
        let yaml = "hotkeys:\n  startpause: f1\n  reset: f2\n  split: f3\n";
        let config: FileConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.outputpath, "");
    }

    #[test]
    fn missing_hotkey_fails_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "hotkeys:\n  startpause: f1\n  reset: f2\n").unwrap();

        assert!(matches!(FileConfig::from_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let err = FileConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("absent.yaml"));
    }

    #[test]
    fn output_path_precedence() {
        let home = Path::new("/home/runner");

        assert_eq!(
            resolve_output_path(Some("/tmp/cli.log"), "$HOME/file.log", Some(home)),
            PathBuf::from("/tmp/cli.log")
        );
        assert_eq!(
            resolve_output_path(None, "$HOME/file.log", Some(home)),
            home.join("file.log")
        );
        assert_eq!(
            resolve_output_path(Some(""), "  ", Some(home)),
            paths::default_output_path()
        );
    }

    #[test]
    fn write_default_config_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        write_default_config(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_YAML);
        assert!(matches!(write_default_config(&path), Err(ConfigError::AlreadyExists(_))));
    }

    #[test]
    fn zero_tick_is_rejected() {
        let cli = Cli::try_parse_from(["splitkey", "--tick-ms", "0"]).unwrap();
        assert!(matches!(cli.tick_interval(), Err(ConfigError::ZeroTick)));

        let cli = Cli::try_parse_from(["splitkey", "-v"]).unwrap();
        assert_eq!(cli.tick_interval().unwrap(), Duration::from_millis(50));
        assert_eq!(cli.log_level(), "debug");
    }
}
