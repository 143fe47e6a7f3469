//! 整批作業協調
//!
//! 掃描與計畫在同一執行緒依序完成，之後才把所有複製指令交給 rayon
//! 執行緒池平行處理。每個指令的結果各自回報，失敗不影響其他指令。

use super::events::{BatchSummary, FailedCopy, OrganizeEvent};
use super::naming_template::NamingTemplates;
use super::operation_planner::{CopyOperation, plan_operations};
use crate::config::UserSettings;
use crate::error::OrganizeError;
use crate::tools::{CopyError, ExtensionFilter, copy_preserving_times, scan_photo_files};
use crossbeam_channel::{Receiver, Sender};
use log::{error, info, warn};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

/// 一次整理作業所需的全部輸入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeRequest {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub extensions: ExtensionFilter,
    pub templates: NamingTemplates,
}

impl OrganizeRequest {
    #[must_use]
    pub fn from_settings(settings: &UserSettings) -> Self {
        Self {
            source_dir: PathBuf::from(settings.source_path.trim()),
            dest_dir: PathBuf::from(settings.destination_path.trim()),
            extensions: ExtensionFilter::parse(&settings.extensions),
            templates: NamingTemplates::new(
                settings.folder_template.clone(),
                settings.file_template.clone(),
            ),
        }
    }
}

/// 執行單一複製指令
pub fn execute_copy(operation: &CopyOperation) -> Result<(), CopyError> {
    copy_preserving_times(&operation.source, &operation.destination).map(|_| ())
}

/// 在目前執行緒執行整批作業，所有進度都透過 `events` 送出。
///
/// 來源資料夾無法使用時送出 `Error` 事件並回傳錯誤；
/// 否則一定以 `Finished` 或 `Cancelled` 結束。
pub fn run_batch(
    request: &OrganizeRequest,
    events: &Sender<OrganizeEvent>,
    shutdown_signal: &AtomicBool,
) -> Result<BatchSummary, OrganizeError> {
    let files = match scan_photo_files(&request.source_dir, &request.extensions) {
        Ok(files) => files,
        Err(e) => {
            error!("無法開始整理: {e}");
            let _ = events.send(OrganizeEvent::Error(e.to_string()));
            return Err(e);
        }
    };
    let _ = events.send(OrganizeEvent::FilesDiscovered { count: files.len() });

    let operations = plan_operations(&files, &request.dest_dir, &request.templates);
    let _ = events.send(OrganizeEvent::OperationsPlanned {
        total: operations.len(),
    });

    let summary = execute_operations(&operations, events, shutdown_signal);

    info!(
        "整理完成 - 複製: {}, 失敗: {}, 略過: {}",
        summary.copied,
        summary.failed(),
        summary.skipped
    );

    let terminal = if summary.skipped > 0 {
        OrganizeEvent::Cancelled(summary.clone())
    } else {
        OrganizeEvent::Finished(summary.clone())
    };
    let _ = events.send(terminal);

    Ok(summary)
}

/// 平行執行所有複製指令，回傳統計結果
pub fn execute_operations(
    operations: &[CopyOperation],
    events: &Sender<OrganizeEvent>,
    shutdown_signal: &AtomicBool,
) -> BatchSummary {
    let copied_count = AtomicUsize::new(0);
    let skipped_count = AtomicUsize::new(0);

    let failures: Vec<FailedCopy> = operations
        .par_iter()
        .filter_map(|operation| {
            if shutdown_signal.load(Ordering::SeqCst) {
                skipped_count.fetch_add(1, Ordering::SeqCst);
                return None;
            }

            let source_name = operation.source_name();
            let destination_name = operation.destination_name();

            match execute_copy(operation) {
                Ok(()) => {
                    copied_count.fetch_add(1, Ordering::SeqCst);
                    let _ = events.send(OrganizeEvent::Copied {
                        source_name,
                        destination_name,
                    });
                    None
                }
                Err(e) => {
                    warn!("複製失敗: {e}");
                    let failure = FailedCopy {
                        source_name,
                        destination_name,
                        error: e.to_string(),
                    };
                    let _ = events.send(OrganizeEvent::CopyFailed(failure.clone()));
                    Some(failure)
                }
            }
        })
        .collect();

    if skipped_count.load(Ordering::SeqCst) > 0 {
        warn!("收到中斷訊號，已略過尚未開始的複製指令");
    }

    BatchSummary {
        total: operations.len(),
        copied: copied_count.load(Ordering::SeqCst),
        skipped: skipped_count.load(Ordering::SeqCst),
        failures,
    }
}

/// 背景執行中的整理作業
pub struct OrganizeHandle {
    /// 接收進度事件，最後一個事件一定是終止事件
    pub events: Receiver<OrganizeEvent>,
    thread: Option<thread::JoinHandle<()>>,
}

impl OrganizeHandle {
    /// 等待背景執行緒結束
    pub fn join(mut self) {
        if let Some(handle) = self.thread.take()
            && handle.join().is_err()
        {
            error!("整理執行緒異常結束");
        }
    }
}

/// 在背景執行緒啟動整理作業
pub fn start_organize(
    request: OrganizeRequest,
    shutdown_signal: Arc<AtomicBool>,
) -> Result<OrganizeHandle, OrganizeError> {
    let (events_tx, events_rx) = crossbeam_channel::unbounded();

    let thread = thread::Builder::new()
        .name("photo-organizer".into())
        .spawn(move || {
            info!(
                "開始整理 {} -> {}",
                request.source_dir.display(),
                request.dest_dir.display()
            );
            run_guarded(&events_tx, || run_batch(&request, &events_tx, &shutdown_signal));
        })?;

    Ok(OrganizeHandle {
        events: events_rx,
        thread: Some(thread),
    })
}

/// 執行整批作業；途中 panic 時補送 `Error`，讓事件串流仍以終止事件結束
fn run_guarded<F>(events: &Sender<OrganizeEvent>, batch: F)
where
    F: FnOnce() -> Result<BatchSummary, OrganizeError>,
{
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(batch)) {
        let message = format!("整理作業異常中止: {}", panic_message(payload.as_ref()));
        error!("{message}");
        let _ = events.send(OrganizeEvent::Error(message));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "未知錯誤".to_string())
}
