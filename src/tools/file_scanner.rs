use crate::error::OrganizeError;
use crate::tools::extension_filter::{ExtensionFilter, lowercase_extension};
use crate::tools::path_validator::validate_directory_exists;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// 小寫、帶前導點的副檔名
    pub extension: String,
    pub size: u64,
}

/// 遞迴掃描來源資料夾，只保留副檔名在過濾集合內的檔案。
///
/// 同一資料夾內依檔名排序走訪，使同一批檔案每次掃描的順序相同。
/// 不會進入指向資料夾的符號連結，因此不會產生循環；
/// 指向一般檔案的符號連結仍會被收錄。
pub fn scan_photo_files(
    source_root: &Path,
    filter: &ExtensionFilter,
) -> Result<Vec<ScannedFile>, OrganizeError> {
    validate_directory_exists(source_root)?;

    info!("開始掃描目錄: {}", source_root.display());

    let files: Vec<ScannedFile> = WalkDir::new(source_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("略過無法讀取的項目: {e}");
                None
            }
        })
        .filter(is_regular_file)
        .filter(|entry| filter.accepts(entry.path()))
        .filter_map(|entry| {
            let size = match std::fs::metadata(entry.path()) {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    warn!("無法讀取檔案大小 {}: {e}", entry.path().display());
                    0
                }
            };
            let extension = lowercase_extension(entry.path())?;
            debug!("找到照片: {}", entry.path().display());
            Some(ScannedFile {
                path: entry.into_path(),
                extension,
                size,
            })
        })
        .collect();

    info!(
        "掃描完成，找到 {} 個照片檔案，共 {} bytes",
        files.len(),
        total_size(&files)
    );
    Ok(files)
}

/// 掃描結果的總位元組數
#[must_use]
pub fn total_size(files: &[ScannedFile]) -> u64 {
    files.iter().map(|file| file.size).sum()
}

fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}
