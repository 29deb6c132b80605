use std::path::{Path, PathBuf};

use dropball_web::DemoConfig;

/// File name searched for when no `--config` is given.
pub const CONFIG_FILE: &str = "dropball.toml";

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file found; built-in defaults.
    Defaults,
    File(PathBuf),
}

impl ConfigSource {
    pub fn label(&self) -> String {
        match self {
            Self::Defaults => "built-in defaults".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Resolve the configuration: the explicit path if given, otherwise the
/// nearest `dropball.toml` from the current directory upward.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<(DemoConfig, ConfigSource)> {
    load_config_from(explicit, &std::env::current_dir()?)
}

pub fn load_config_from(
    explicit: Option<&Path>,
    start: &Path,
) -> anyhow::Result<(DemoConfig, ConfigSource)> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => find_config_from(start),
    };

    let Some(path) = path else {
        log::info!("No {CONFIG_FILE} found, using defaults");
        return Ok((DemoConfig::default(), ConfigSource::Defaults));
    };

    let content = std::fs::read_to_string(&path)?;
    let config = DemoConfig::from_toml_str(&content)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
    log::info!("Loaded config from {}", path.display());
    Ok((config, ConfigSource::File(path)))
}

/// Walk up from `start` looking for `dropball.toml`.
pub fn find_config_from(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_in_start_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "").unwrap();
        assert_eq!(find_config_from(dir.path()), Some(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[physics]\nreset_interval = 120\n",
        )
        .unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, source) = load_config_from(None, &nested).unwrap();
        assert_eq!(config.physics.reset_interval, 120);
        assert_eq!(source, ConfigSource::File(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn test_nearest_config_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[physics]\nreset_interval = 1\n").unwrap();
        let nested = dir.path().join("inner");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join(CONFIG_FILE), "[physics]\nreset_interval = 2\n").unwrap();

        let (config, _) = load_config_from(None, &nested).unwrap();
        assert_eq!(config.physics.reset_interval, 2);
    }

    #[test]
    fn test_explicit_path_overrides_search() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[physics]\nreset_interval = 1\n").unwrap();
        let other = dir.path().join("other.toml");
        std::fs::write(&other, "[light]\nintensity = 0.3\n").unwrap();

        let (config, source) = load_config_from(Some(&other), dir.path()).unwrap();
        assert_eq!(config.light.intensity, 0.3);
        assert_eq!(config.physics.reset_interval, 350);
        assert_eq!(source, ConfigSource::File(other));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from(Some(&dir.path().join("nope.toml")), dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[physics]\nreset_interval = 0\n").unwrap();
        let err = load_config_from(None, dir.path()).unwrap_err().to_string();
        assert!(err.contains(CONFIG_FILE), "{err}");
        assert!(err.contains("reset_interval"), "{err}");
    }

    #[test]
    fn test_source_label() {
        assert_eq!(ConfigSource::Defaults.label(), "built-in defaults");
        assert!(ConfigSource::File(PathBuf::from("x/dropball.toml"))
            .label()
            .ends_with("dropball.toml"));
    }
}
