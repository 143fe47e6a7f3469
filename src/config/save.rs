use crate::config::load::settings_path;
use crate::config::types::{MAX_RECENT_PATHS, UserSettings};
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;

pub fn save_settings(settings: &UserSettings) -> Result<()> {
    let path = settings_path().ok_or_else(|| anyhow!("找不到使用者設定資料夾"))?;
    save_settings_to(&path, settings)
}

pub fn save_settings_to(path: &Path, settings: &UserSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create settings directory {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}

/// 更新最近使用的來源路徑
/// 將新路徑加入最前面，去重並限制數量
pub fn add_recent_path(settings: &mut UserSettings, path: &str) {
    settings.recent_sources.retain(|p| p != path);
    settings.recent_sources.insert(0, path.to_string());
    settings.recent_sources.truncate(MAX_RECENT_PATHS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load::load_settings_from;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/settings.json");
        let settings = UserSettings {
            source_path: "/in".to_string(),
            folder_template: "%Y-%m".to_string(),
            ..Default::default()
        };

        save_settings_to(&path, &settings).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"folder_fmt\""));
        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_add_recent_path_dedups_and_truncates() {
        let mut settings = UserSettings::default();
        for i in 0..7 {
            add_recent_path(&mut settings, &format!("/p{i}"));
        }
        add_recent_path(&mut settings, "/p3");

        assert_eq!(settings.recent_sources.len(), MAX_RECENT_PATHS);
        assert_eq!(settings.recent_sources[0], "/p3");
        assert_eq!(
            settings.recent_sources.iter().filter(|p| *p == "/p3").count(),
            1
        );
    }
}
