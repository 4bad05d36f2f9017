use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::discovery::CONDUCTOR_DIR;
use crate::model::config::ViewerConfig;

pub const CONFIG_FILE: &str = "tui.toml";

/// Error type for reading `tui.toml`
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid {field} in {path}: {reason}")]
    InvalidValue {
        path: PathBuf,
        field: &'static str,
        reason: &'static str,
    },
}

/// Path of the viewer config for a project root
pub fn config_path(base: &Path) -> PathBuf {
    base.join(CONDUCTOR_DIR).join(CONFIG_FILE)
}

/// Read `conductor/tui.toml`. A missing file means defaults; an unreadable
/// or malformed one is an error.
pub fn read_config(base: &Path) -> Result<ViewerConfig, ConfigError> {
    let path = config_path(base);
    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ViewerConfig::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    let config: ViewerConfig =
        toml::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?;
    if config.refresh_interval_ms == 0 {
        return Err(ConfigError::InvalidValue {
            path,
            field: "refresh_interval_ms",
            reason: "must be at least 1",
        });
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_config(tmp.path()).unwrap(), ViewerConfig::default());
    }

    #[test]
    fn test_reads_config() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(CONDUCTOR_DIR)).unwrap();
        fs::write(
            config_path(tmp.path()),
            "refresh_interval_ms = 750\nshow_archived = true\n",
        )
        .unwrap();

        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.refresh_interval_ms, 750);
        assert!(config.show_archived);
    }

    #[test]
    fn test_malformed_config_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(CONDUCTOR_DIR)).unwrap();
        fs::write(config_path(tmp.path()), "refresh_interval_ms = \"soon\"\n").unwrap();

        let err = read_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("tui.toml"));
    }

    #[test]
    fn test_zero_refresh_interval_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(CONDUCTOR_DIR)).unwrap();
        fs::write(config_path(tmp.path()), "refresh_interval_ms = 0\n").unwrap();

        let err = read_config(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "refresh_interval_ms",
                ..
            }
        ));
        assert!(err.to_string().contains("must be at least 1"));
    }
}
