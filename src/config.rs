//! Configuration for machines and the command-line host.
//!
//! Configuration is assembled from several sources, lowest priority first:
//! 1. Built-in defaults
//! 2. Project-local config file (`./intcode.toml`)
//! 3. A file named with `--config` on the command line
//! 4. Environment variables (`INTCODE_LEGACY_HALT_OUTPUT`)
//!
//! # Config File Format
//!
//! ```toml
//! [machine]
//! legacy_halt_output = false
//!
//! [host]
//! echo_commands = true
//! track_position = true
//! show_position = false
//! prompt = "> "
//! ```

use crate::error::{IntcodeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the project-local config file
pub const LOCAL_CONFIG_FILE: &str = "intcode.toml";

/// Options that change how a single machine executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MachineConfig {
    /// On halt, append the last value output during the run (or -1 when
    /// nothing was output) to the output buffer once more. Some older hosts
    /// expect this trailing marker. Running a machine that has already
    /// halted executes nothing and appends no further marker.
    pub legacy_halt_output: bool,
}

/// Options for the interactive ASCII host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Print each command read from input before feeding it to the machine
    pub echo_commands: bool,
    /// Follow north/south/east/west commands and log the resulting position
    pub track_position: bool,
    /// Also write `Position: (row, col)` to the session output after every
    /// command while tracking
    pub show_position: bool,
    /// Prompt written before reading a command from a terminal
    pub prompt: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            echo_commands: true,
            track_position: true,
            show_position: false,
            prompt: "> ".to_string(),
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub machine: MachineConfig,
    pub host: HostConfig,
}

/// One config file as written: only the keys it sets are `Some`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    machine: MachineLayer,
    host: HostLayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MachineLayer {
    legacy_halt_output: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct HostLayer {
    echo_commands: Option<bool>,
    track_position: Option<bool>,
    show_position: Option<bool>,
    prompt: Option<String>,
}

impl ConfigLayer {
    fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| IntcodeError::Config(e.to_string()))
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let layer = Self::parse(&content)
            .map_err(|e| IntcodeError::Config(format!("{}: {}", path.display(), e)))?;
        log::info!("Loaded config from {}", path.display());
        Ok(layer)
    }
}

impl Config {
    /// Load configuration from defaults, the local config file, an optional
    /// explicit file and the environment.
    ///
    /// A missing local file is fine; an explicit file that cannot be read or
    /// parsed is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_layered(Path::new(LOCAL_CONFIG_FILE), explicit, |key| {
            std::env::var(key).ok()
        })
    }

    /// Layer `local`, then `explicit`, then variables found by `env` over the
    /// defaults. Each layer only overrides the keys it sets.
    pub fn load_layered<F>(local: &Path, explicit: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(layer) = Self::load_local_config(local) {
            config.merge(layer);
        }

        if let Some(path) = explicit {
            config.merge(ConfigLayer::read(path)?);
        }

        config.apply_env_overrides(env);
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config = Self::default();
        config.merge(ConfigLayer::parse(text)?);
        Ok(config)
    }

    /// Load configuration from a specific file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge(ConfigLayer::read(path)?);
        Ok(config)
    }

    /// Read the project-local file, ignoring it when absent or broken
    fn load_local_config(path: &Path) -> Option<ConfigLayer> {
        if !path.exists() {
            return None;
        }

        match ConfigLayer::read(path) {
            Ok(layer) => Some(layer),
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge a file layer into this config.
    /// Only overrides fields that are set in the layer.
    fn merge(&mut self, layer: ConfigLayer) {
        if let Some(value) = layer.machine.legacy_halt_output {
            self.machine.legacy_halt_output = value;
        }
        if let Some(value) = layer.host.echo_commands {
            self.host.echo_commands = value;
        }
        if let Some(value) = layer.host.track_position {
            self.host.track_position = value;
        }
        if let Some(value) = layer.host.show_position {
            self.host.show_position = value;
        }
        if let Some(value) = layer.host.prompt {
            self.host.prompt = value;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env("INTCODE_LEGACY_HALT_OUTPUT") {
            let enabled = matches!(value.as_str(), "1" | "true" | "yes");
            log::info!(
                "Using INTCODE_LEGACY_HALT_OUTPUT from environment: {}",
                enabled
            );
            self.machine.legacy_halt_output = enabled;
        }
    }

    /// Generate a sample config file content.
    pub fn sample_config() -> String {
        r#"# intcode configuration
# Place this file at ./intcode.toml or pass it with --config

[machine]
# Repeat the last output (or -1) when the program halts
legacy_halt_output = false

[host]
# Echo each command read in ASCII mode
echo_commands = true
# Log the compass position after north/south/east/west commands
track_position = true
# Print the tracked position after every command
show_position = false
prompt = "> "
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use test_log::test;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.machine.legacy_halt_output);
        assert!(config.host.echo_commands);
        assert_eq!(config.host.prompt, "> ");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("[machine]\nlegacy_halt_output = true\n").unwrap();
        assert!(config.machine.legacy_halt_output);
        assert_eq!(config.host, HostConfig::default());
    }

    #[test]
    fn test_sample_config_parses() {
        let config = Config::from_toml_str(&Config::sample_config()).unwrap();
        assert_eq!(config, Config::default());
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("intcode-config-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_without_files_gives_defaults() {
        let dir = scratch_dir("none");
        let config = Config::load_layered(&dir.join(LOCAL_CONFIG_FILE), None, no_env).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_file_layers_over_local_file() {
        let dir = scratch_dir("layers");
        let local = dir.join(LOCAL_CONFIG_FILE);
        let explicit = dir.join("explicit.toml");
        std::fs::write(&local, "[host]\nprompt = \"$ \"\necho_commands = false\n").unwrap();
        std::fs::write(&explicit, "[machine]\nlegacy_halt_output = true\n").unwrap();

        let config = Config::load_layered(&local, None, no_env).unwrap();
        assert_eq!(config.host.prompt, "$ ");
        assert!(!config.host.echo_commands);
        assert!(!config.machine.legacy_halt_output);

        let config = Config::load_layered(&local, Some(&explicit), no_env).unwrap();
        assert_eq!(config.host.prompt, "$ ");
        assert!(!config.host.echo_commands);
        assert!(config.host.track_position);
        assert!(config.machine.legacy_halt_output);

        // the explicit file wins for keys both set
        std::fs::write(&explicit, "[host]\nprompt = \"% \"\n").unwrap();
        let config = Config::load_layered(&local, Some(&explicit), no_env).unwrap();
        assert_eq!(config.host.prompt, "% ");
        assert!(!config.host.echo_commands);
    }

    #[test]
    fn test_environment_overrides_files() {
        let dir = scratch_dir("env");
        let local = dir.join(LOCAL_CONFIG_FILE);
        std::fs::write(&local, "[machine]\nlegacy_halt_output = true\n").unwrap();

        let off = |key: &str| (key == "INTCODE_LEGACY_HALT_OUTPUT").then(|| "0".to_string());
        let config = Config::load_layered(&local, None, off).unwrap();
        assert!(!config.machine.legacy_halt_output);

        std::fs::write(&local, "").unwrap();
        let on = |key: &str| (key == "INTCODE_LEGACY_HALT_OUTPUT").then(|| "true".to_string());
        let config = Config::load_layered(&local, None, on).unwrap();
        assert!(config.machine.legacy_halt_output);
    }

    #[test]
    fn test_broken_local_file_ignored_but_explicit_file_fails() {
        let dir = scratch_dir("broken");
        let broken = dir.join("broken.toml");
        std::fs::write(&broken, "[machine\n").unwrap();

        let config = Config::load_layered(&broken, None, no_env).unwrap();
        assert_eq!(config, Config::default());

        let err = Config::load_layered(&dir.join("absent.toml"), Some(&broken), no_env).unwrap_err();
        assert!(matches!(err, IntcodeError::Config(_)));
        let err = Config::load_layered(&broken, Some(&dir.join("absent.toml")), no_env).unwrap_err();
        assert!(matches!(err, IntcodeError::Io(_)));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml_str("[machine]\nlegacy_halt_output = 3\n").unwrap_err();
        assert!(matches!(err, IntcodeError::Config(_)));
    }
}
