use crate::config::types::{Config, UserSettings};
use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("無法讀取設定檔 {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("設定檔格式錯誤 {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Config {
    /// 載入使用者設定；設定檔損毀時記錄警告並使用預設值
    #[must_use]
    pub fn new() -> Self {
        let settings = match settings_path() {
            Some(path) => load_settings_from(&path).unwrap_or_else(|e| {
                warn!("{e}，改用預設設定");
                UserSettings::default()
            }),
            None => {
                warn!("找不到使用者設定資料夾，改用預設設定");
                UserSettings::default()
            }
        };

        Self { settings }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// 每個使用者各自的設定檔位置。
///
/// Windows: `%LOCALAPPDATA%\PhotoOrganizer\settings.json`
/// 其他平台: `~/.config/photoorganizer/settings.json`
#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    settings_dir().map(|dir| dir.join(SETTINGS_FILE_NAME))
}

#[cfg(windows)]
fn settings_dir() -> Option<PathBuf> {
    std::env::var_os("LOCALAPPDATA")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|base| PathBuf::from(base).join("PhotoOrganizer"))
}

#[cfg(not(windows))]
fn settings_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("photoorganizer")
    })
}

/// 讀取指定的設定檔，檔案不存在時回傳預設值
pub fn load_settings_from(path: &Path) -> Result<UserSettings, ConfigError> {
    if !path.exists() {
        info!("設定檔不存在，使用預設設定: {}", path.display());
        return Ok(UserSettings::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = load_settings_from(&temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, UserSettings::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_settings_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_reads_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, r#"{"src": "/in", "dest": "/out"}"#).unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.source_path, "/in");
        assert_eq!(settings.destination_path, "/out");
    }

    #[test]
    fn test_settings_path_file_name() {
        if let Some(path) = settings_path() {
            assert_eq!(path.file_name().unwrap(), SETTINGS_FILE_NAME);
        }
    }
}
