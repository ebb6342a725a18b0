use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::BridgeConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "wabridge.toml",
    "wabridge.yaml",
    "wabridge.yml",
    "wabridge.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<BridgeConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations, then apply
/// `WABRIDGE_*` environment overrides.
///
/// Search order:
/// 1. `./wabridge.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/wabridge/wabridge.{toml,yaml,yml,json}` (user-global)
///
/// Falls back to `BridgeConfig::default()` if no file is found or it fails
/// to parse.
pub fn discover_and_load() -> BridgeConfig {
    let mut config = load_found(find_config_file());
    config.apply_env_overrides();
    config
}

fn load_found(path: Option<PathBuf>) -> BridgeConfig {
    match path {
        Some(path) => load_or_default(&path),
        None => {
            debug!("no config file found, using defaults");
            BridgeConfig::default()
        },
    }
}

fn load_or_default(path: &Path) -> BridgeConfig {
    debug!(path = %path.display(), "loading config");
    match load_config(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            BridgeConfig::default()
        },
    }
}

fn find_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    find_in(Path::new(".")).or_else(|| config_dir().and_then(|dir| find_in(&dir)))
}

/// Returns the config directory: `~/.config/wabridge/` on all platforms.
pub fn config_dir() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".config").join("wabridge"))
}

/// Returns the data directory: `~/.wabridge/` on all platforms.
pub fn data_dir() -> PathBuf {
    home_dir()
        .map(|h| h.join(".wabridge"))
        .unwrap_or_else(|| PathBuf::from(".wabridge"))
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<BridgeConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wabridge.toml");
        std::fs::write(
            &path,
            "[server]\nport = 4000\n\n[whatsapp]\nsession_dir = \"/tmp/wa\"\n",
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.server.bind, "127.0.0.1");
        assert_eq!(
            cfg.whatsapp.session_dir.as_deref(),
            Some(Path::new("/tmp/wa"))
        );
    }

    #[test]
    fn loads_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("wabridge.yaml");
        std::fs::write(&yaml, "client:\n  default_targets: [\"1@g.us\"]\n").unwrap();
        let cfg = load_config(&yaml).unwrap();
        assert_eq!(cfg.client.default_targets, vec!["1@g.us"]);

        let json = dir.path().join("wabridge.json");
        std::fs::write(&json, r#"{"whatsapp": {"device_name": "ops"}}"#).unwrap();
        let cfg = load_config(&json).unwrap();
        assert_eq!(cfg.whatsapp.device_name, "ops");
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wabridge.ini");
        std::fs::write(&path, "port=1").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }

    #[test]
    fn first_found_file_wins_and_parse_errors_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_found(find_in(dir.path())), BridgeConfig::default());

        std::fs::write(dir.path().join("wabridge.toml"), "[server]\nport = 5000\n").unwrap();
        std::fs::write(dir.path().join("wabridge.json"), r#"{"server":{"port":6000}}"#).unwrap();
        assert_eq!(load_found(find_in(dir.path())).server.port, 5000);

        std::fs::write(dir.path().join("wabridge.toml"), "[server\nport =").unwrap();
        assert_eq!(load_found(find_in(dir.path())), BridgeConfig::default());
    }
}
