use std::collections::HashSet;
use std::path::Path;

/// 預設接受的照片副檔名
pub const DEFAULT_EXTENSIONS: [&str; 9] = [
    "jpg", "jpeg", "png", "arw", "cr2", "nef", "dng", "orf", "rw2",
];

/// 設定畫面使用的預設副檔名字串
pub const DEFAULT_EXTENSIONS_TEXT: &str = "jpg, jpeg, png, arw, cr2, nef, dng, orf, rw2";

/// 接受的副檔名集合，內部一律存成小寫並帶前導點（例如 `.jpg`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: HashSet<String>,
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::from_tokens(DEFAULT_EXTENSIONS)
    }
}

impl ExtensionFilter {
    /// 解析以逗號分隔的副檔名字串，`jpg` 與 `.JPG` 視為相同。
    /// 沒有任何有效項目時使用預設集合。
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let filter = Self::from_tokens(text.split(','));
        if filter.extensions.is_empty() {
            Self::default()
        } else {
            filter
        }
    }

    fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let extensions = tokens
            .into_iter()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(normalize_extension)
            .collect();
        Self { extensions }
    }

    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        lowercase_extension(path).is_some_and(|ext| self.extensions.contains(&ext))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

fn normalize_extension(token: &str) -> String {
    let lower = token.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

/// 取得小寫且帶前導點的副檔名；沒有副檔名時回傳 `None`
#[must_use]
pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_input_forms() {
        let filter = ExtensionFilter::parse("jpg, .PNG ,Nef");

        assert_eq!(filter.len(), 3);
        assert!(filter.accepts(Path::new("/a/b.jpg")));
        assert!(filter.accepts(Path::new("/a/b.JPG")));
        assert!(filter.accepts(Path::new("/a/b.png")));
        assert!(filter.accepts(Path::new("/a/b.nef")));
        assert!(!filter.accepts(Path::new("/a/b.cr2")));
    }

    #[test]
    fn test_blank_input_falls_back_to_defaults() {
        assert_eq!(ExtensionFilter::parse(" , ,"), ExtensionFilter::default());
        assert_eq!(ExtensionFilter::parse(""), ExtensionFilter::default());
    }

    #[test]
    fn test_default_text_matches_default_set() {
        assert_eq!(
            ExtensionFilter::parse(DEFAULT_EXTENSIONS_TEXT),
            ExtensionFilter::default()
        );
    }

    #[test]
    fn test_files_without_extension_are_rejected() {
        let filter = ExtensionFilter::default();
        assert!(!filter.accepts(Path::new("/a/README")));
        assert!(!filter.accepts(Path::new("/a/.jpg")));
    }

    #[test]
    fn test_lowercase_extension() {
        assert_eq!(
            lowercase_extension(Path::new("IMG_1.CR2")),
            Some(".cr2".to_string())
        );
        assert_eq!(lowercase_extension(Path::new("noext")), None);
    }
}
