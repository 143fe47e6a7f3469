use filetime::{FileTime, set_file_times};
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("無法建立資料夾 {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("複製檔案失敗 {} -> {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

/// 複製單一檔案，必要時建立目的資料夾。
///
/// 目的檔已存在時直接覆蓋；來源檔案不會被修改。
/// 複製完成後套用來源的存取／修改時間，失敗時只記錄警告。
pub fn copy_preserving_times(source: &Path, destination: &Path) -> Result<u64, CopyError> {
    if let Some(parent) = destination.parent() {
        // create_dir_all 對已存在（含其他執行緒剛建立）的資料夾不會報錯
        fs::create_dir_all(parent).map_err(|source| CopyError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let bytes = fs::copy(source, destination).map_err(|e| CopyError::Copy {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        source: e,
    })?;

    match fs::metadata(source) {
        Ok(metadata) => {
            let atime = FileTime::from_last_access_time(&metadata);
            let mtime = FileTime::from_last_modification_time(&metadata);
            if let Err(e) = set_file_times(destination, atime, mtime) {
                warn!("無法保留檔案時間 {}: {e}", destination.display());
            }
        }
        Err(e) => warn!("無法讀取來源檔案資訊 {}: {e}", source.display()),
    }

    debug!(
        "已複製 {} -> {} ({bytes} bytes)",
        source.display(),
        destination.display()
    );
    Ok(bytes)
}
