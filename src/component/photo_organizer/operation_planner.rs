//! 複製計畫產生
//!
//! 依拍攝日期把檔案分到目的資料夾，每個資料夾內從 1 開始編流水號，
//! 再依樣板產生最終檔名。

use super::naming_template::{DEFAULT_FOLDER_TEMPLATE, NamingTemplates, fallback_file_stem};
use crate::tools::{CaptureDate, ScannedFile, resolve_capture_date};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// 單一複製指令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOperation {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// 在目的資料夾內的流水號（從 1 開始）
    pub sequence: usize,
}

impl CopyOperation {
    #[must_use]
    pub fn source_name(&self) -> String {
        display_name(&self.source)
    }

    #[must_use]
    pub fn destination_name(&self) -> String {
        display_name(&self.destination)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// 同一目的資料夾內的檔案
#[derive(Debug)]
struct FolderGroup {
    folder: PathBuf,
    entries: Vec<(CaptureDate, ScannedFile)>,
}

/// 為每個檔案判定拍攝日期後產生複製計畫
#[must_use]
pub fn plan_operations(
    files: &[ScannedFile],
    dest_root: &Path,
    templates: &NamingTemplates,
) -> Vec<CopyOperation> {
    let dated: Vec<(CaptureDate, ScannedFile)> = files
        .iter()
        .map(|file| (resolve_capture_date(&file.path), file.clone()))
        .collect();
    plan_dated_operations(dated, dest_root, templates)
}

/// 以已知的拍攝日期產生複製計畫。
///
/// 輸出順序：資料夾依第一次出現的順序，資料夾內依流水號。
/// 拍攝日期相同時保留輸入順序（穩定排序）。
#[must_use]
pub fn plan_dated_operations(
    dated: Vec<(CaptureDate, ScannedFile)>,
    dest_root: &Path,
    templates: &NamingTemplates,
) -> Vec<CopyOperation> {
    let total = dated.len();
    let mut groups = group_by_folder(dated, dest_root, templates);

    let mut operations = Vec::with_capacity(total);
    for group in &mut groups {
        group.entries.sort_by_key(|(date, _)| date.datetime);

        let mut used_names: HashSet<String> = HashSet::with_capacity(group.entries.len());
        for (index, (date, file)) in group.entries.iter().enumerate() {
            let sequence = index + 1;
            let stem = match templates.render_file_stem(&date.datetime, sequence) {
                Ok(stem) => stem,
                Err(e) => {
                    warn!(
                        "檔名樣板無法使用 ({}): {e}，改用預設檔名",
                        file.path.display()
                    );
                    fallback_file_stem(sequence)
                }
            };

            let file_name = unique_file_name(&stem, &file.extension, &mut used_names);
            let destination = group.folder.join(&file_name);
            debug!("{} -> {}", file.path.display(), destination.display());

            operations.push(CopyOperation {
                source: file.path.clone(),
                destination,
                sequence,
            });
        }
    }

    info!(
        "產生 {} 個複製指令，分布於 {} 個資料夾",
        operations.len(),
        groups.len()
    );
    operations
}

fn group_by_folder(
    dated: Vec<(CaptureDate, ScannedFile)>,
    dest_root: &Path,
    templates: &NamingTemplates,
) -> Vec<FolderGroup> {
    let mut groups: Vec<FolderGroup> = Vec::new();
    let mut index_by_folder: HashMap<PathBuf, usize> = HashMap::new();

    for (date, file) in dated {
        let relative = templates.render_folder(&date.datetime).unwrap_or_else(|e| {
            warn!(
                "資料夾樣板無法使用 ({}): {e}，改用 {DEFAULT_FOLDER_TEMPLATE}",
                file.path.display()
            );
            default_folder(&date)
        });
        let folder = dest_root.join(relative);

        let index = *index_by_folder.entry(folder.clone()).or_insert_with(|| {
            groups.push(FolderGroup {
                folder,
                entries: Vec::new(),
            });
            groups.len() - 1
        });
        groups[index].entries.push((date, file));
    }

    groups
}

fn default_folder(date: &CaptureDate) -> String {
    date.datetime.format(DEFAULT_FOLDER_TEMPLATE).to_string()
}

/// 同一資料夾內檔名重複時，在副檔名前加上 `_2`、`_3`…
fn unique_file_name(stem: &str, extension: &str, used_names: &mut HashSet<String>) -> String {
    let mut candidate = format!("{stem}{extension}");
    let mut suffix = 2;
    while used_names.contains(&candidate) {
        candidate = format!("{stem}_{suffix}{extension}");
        suffix += 1;
    }
    if suffix > 2 {
        warn!("目的檔名重複，改為 {candidate}");
    }
    used_names.insert(candidate.clone());
    candidate
}
