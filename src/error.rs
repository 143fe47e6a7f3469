//! 整理流程中會中止整批作業的錯誤
//!
//! 單一檔案的問題（EXIF 讀取、命名樣板）都在各自模組內回退處理，
//! 只有在開始複製之前就無法繼續的情況才會出現在這裡。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("來源資料夾不存在: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("來源路徑不是資料夾: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("無法建立工作執行緒: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}
