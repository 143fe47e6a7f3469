use crate::component::photo_organizer::{DEFAULT_FILE_TEMPLATE, DEFAULT_FOLDER_TEMPLATE};
use crate::tools::DEFAULT_EXTENSIONS_TEXT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 最近使用的來源路徑保留數量
pub const MAX_RECENT_PATHS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
    #[serde(rename = "ja-JP")]
    JaJp,
}

impl Language {
    pub const ALL: [Self; 3] = [Self::EnUs, Self::ZhTw, Self::JaJp];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
            Self::JaJp => "ja-JP",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EnUs => "English",
            Self::ZhTw => "繁體中文",
            Self::JaJp => "日本語",
        };
        write!(f, "{name}")
    }
}

/// 使用者設定，欄位名稱沿用既有的 settings.json 格式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    #[serde(rename = "src")]
    pub source_path: String,
    #[serde(rename = "dest")]
    pub destination_path: String,
    #[serde(rename = "exts")]
    pub extensions: String,
    #[serde(rename = "folder_fmt")]
    pub folder_template: String,
    #[serde(rename = "file_fmt")]
    pub file_template: String,
    pub language: Language,
    pub recent_sources: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            source_path: String::new(),
            destination_path: String::new(),
            extensions: DEFAULT_EXTENSIONS_TEXT.to_string(),
            folder_template: DEFAULT_FOLDER_TEMPLATE.to_string(),
            file_template: DEFAULT_FILE_TEMPLATE.to_string(),
            language: Language::default(),
            recent_sources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: UserSettings,
}
