//! 依拍攝日期整理照片元件
//!
//! 掃描來源資料夾中的照片，依拍攝日期分資料夾並以流水號重新命名後複製到目的地

mod batch_runner;
mod events;
mod main;
mod naming_template;
mod operation_planner;

pub use batch_runner::{
    OrganizeHandle, OrganizeRequest, execute_copy, execute_operations, run_batch, start_organize,
};
pub use events::{BatchOutcome, BatchSummary, FailedCopy, OrganizeEvent};
pub use main::PhotoOrganizer;
pub use naming_template::{
    DEFAULT_FILE_TEMPLATE, DEFAULT_FOLDER_TEMPLATE, MAX_SEQ_WIDTH, NamingTemplates, TemplateError,
    fallback_file_stem,
};
pub use operation_planner::{CopyOperation, plan_dated_operations, plan_operations};
