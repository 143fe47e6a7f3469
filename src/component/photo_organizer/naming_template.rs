//! 資料夾與檔名樣板
//!
//! 兩種樣板都先套用 strftime 日期代碼；檔名樣板之後再代入 `{seq}` 流水號。

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::fmt::Write;
use std::path::{Component, Path};
use std::sync::LazyLock;
use thiserror::Error;

pub const DEFAULT_FOLDER_TEMPLATE: &str = "%Y/%m/%d";
pub const DEFAULT_FILE_TEMPLATE: &str = "IMG_{seq:04d}";

/// `{seq:N}` 允許的最大寬度
pub const MAX_SEQ_WIDTH: usize = 255;

/// `{seq}` 的格式規格：可選的 0 補位、寬度與 `d`
static REGEX_SEQ_SPEC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0?)(\d*)d?$").expect("Invalid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("日期格式代碼無效: {0}")]
    DateFormat(String),
    #[error("未知的欄位 {{{0}}}")]
    UnknownField(String),
    #[error("流水號格式無效: {0}")]
    SeqFormat(String),
    #[error("大括號未成對: {0}")]
    UnbalancedBrace(String),
    #[error("資料夾樣板不可為空")]
    EmptyFolder,
    #[error("資料夾必須位於目的地之內: {0}")]
    OutsideDestination(String),
}

/// 以 strftime 格式化日期；格式代碼無效時回傳錯誤而不是 panic
pub fn format_date(datetime: &NaiveDateTime, pattern: &str) -> Result<String, TemplateError> {
    let mut output = String::new();
    write!(output, "{}", datetime.format(pattern))
        .map_err(|_| TemplateError::DateFormat(pattern.to_string()))?;
    Ok(output)
}

/// 代入 `{seq}` 欄位，`{{` 與 `}}` 代表字面大括號
pub fn substitute_sequence(pattern: &str, seq: usize) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(pattern.len() + 4);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                output.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                output.push('}');
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    field.push(inner);
                }
                if !closed {
                    return Err(TemplateError::UnbalancedBrace(pattern.to_string()));
                }
                output.push_str(&format_field(&field, seq)?);
            }
            '}' => return Err(TemplateError::UnbalancedBrace(pattern.to_string())),
            _ => output.push(c),
        }
    }

    Ok(output)
}

fn format_field(field: &str, seq: usize) -> Result<String, TemplateError> {
    let (name, spec) = field.split_once(':').unwrap_or((field, ""));
    if name != "seq" {
        return Err(TemplateError::UnknownField(name.to_string()));
    }

    let captures = REGEX_SEQ_SPEC
        .captures(spec)
        .ok_or_else(|| TemplateError::SeqFormat(spec.to_string()))?;
    let zero_pad = !captures[1].is_empty();
    let width = match &captures[2] {
        "" => 0,
        digits => digits
            .parse::<usize>()
            .ok()
            .filter(|width| *width <= MAX_SEQ_WIDTH)
            .ok_or_else(|| TemplateError::SeqFormat(spec.to_string()))?,
    };

    Ok(if zero_pad {
        format!("{seq:0width$}")
    } else {
        format!("{seq:>width$}")
    })
}

/// 使用者設定的一組資料夾／檔名樣板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingTemplates {
    pub folder: String,
    pub file: String,
}

impl Default for NamingTemplates {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDER_TEMPLATE, DEFAULT_FILE_TEMPLATE)
    }
}

impl NamingTemplates {
    pub fn new(folder: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            file: file.into(),
        }
    }

    /// 產生相對於目的地根目錄的資料夾路徑（可含 `/` 形成多層）。
    /// 絕對路徑或含 `..` 的結果會離開目的地，視為錯誤。
    pub fn render_folder(&self, datetime: &NaiveDateTime) -> Result<String, TemplateError> {
        let rendered = format_date(datetime, &self.folder)?;
        if rendered.trim().is_empty() {
            return Err(TemplateError::EmptyFolder);
        }
        let escapes = Path::new(&rendered).components().any(|component| {
            matches!(
                component,
                Component::RootDir | Component::Prefix(_) | Component::ParentDir
            )
        });
        if escapes {
            return Err(TemplateError::OutsideDestination(rendered));
        }
        Ok(rendered)
    }

    /// 產生不含副檔名的檔名
    pub fn render_file_stem(
        &self,
        datetime: &NaiveDateTime,
        seq: usize,
    ) -> Result<String, TemplateError> {
        let dated = format_date(datetime, &self.file)?;
        substitute_sequence(&dated, seq)
    }

    /// 以範例日期試算兩個樣板，讓介面在執行前就能提示錯誤
    pub fn validate(&self) -> Result<(), TemplateError> {
        let sample = NaiveDate::from_ymd_opt(2024, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .expect("valid sample date");
        self.render_folder(&sample)?;
        self.render_file_stem(&sample, 1)?;
        Ok(())
    }
}

/// 檔名樣板無法使用時的固定檔名
#[must_use]
pub fn fallback_file_stem(seq: usize) -> String {
    format!("IMG_{seq:04}")
}
