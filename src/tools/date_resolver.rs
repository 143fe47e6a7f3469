//! 拍攝日期判定
//!
//! 優先使用 EXIF `DateTimeOriginal`，讀不到時改用檔案修改時間。

use chrono::{DateTime, Local, NaiveDateTime};
use exif::{In, Reader, Tag, Value};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// EXIF 日期欄位的固定格式
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// TIFF 架構的 RAW 檔（CR2、NEF、ARW、DNG）只讀取這麼多位元組來找 EXIF
pub const TIFF_HEADER_LIMIT: u64 = 256 * 1024;

const TIFF_MAGIC_LE: [u8; 4] = *b"II*\0";
const TIFF_MAGIC_BE: [u8; 4] = *b"MM\0*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    Exif,
    Modified,
    /// 連修改時間都取不到，使用 Unix epoch
    Epoch,
}

/// 檔案的拍攝時間（本地時間，不含時區）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureDate {
    pub datetime: NaiveDateTime,
    pub source: DateSource,
}

impl CaptureDate {
    #[must_use]
    pub const fn new(datetime: NaiveDateTime, source: DateSource) -> Self {
        Self { datetime, source }
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("無法開啟檔案: {0}")]
    Open(#[from] std::io::Error),
    #[error("無法讀取 EXIF: {0}")]
    Exif(#[from] exif::Error),
    #[error("缺少 DateTimeOriginal 欄位")]
    MissingTag,
    #[error("無法解析日期 {value:?}: {source}")]
    Parse {
        value: String,
        source: chrono::ParseError,
    },
}

/// 取得檔案的拍攝時間，永遠會回傳結果
#[must_use]
pub fn resolve_capture_date(path: &Path) -> CaptureDate {
    match read_exif_capture_date(path) {
        Ok(datetime) => return CaptureDate::new(datetime, DateSource::Exif),
        Err(e) => debug!("改用修改時間 {}: {e}", path.display()),
    }

    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => CaptureDate::new(to_local(modified), DateSource::Modified),
        Err(e) => {
            warn!("無法取得修改時間 {}: {e}", path.display());
            CaptureDate::new(to_local(UNIX_EPOCH), DateSource::Epoch)
        }
    }
}

/// 只讀取容器標頭中的 EXIF 區塊，不解碼影像資料。
///
/// TIFF 架構的檔案整個就是 EXIF 容器，只讀取前 [`TIFF_HEADER_LIMIT`] 位元組；
/// 其他格式（JPEG、PNG、HEIF、WebP）交給容器解析器定位 EXIF 區段。
pub fn read_exif_capture_date(path: &Path) -> Result<NaiveDateTime, MetadataError> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 4];
    file.read_exact(&mut magic)?;
    file.rewind()?;

    let exif = if magic == TIFF_MAGIC_LE || magic == TIFF_MAGIC_BE {
        let mut header = Vec::new();
        file.take(TIFF_HEADER_LIMIT).read_to_end(&mut header)?;
        Reader::new().read_raw(header)?
    } else {
        Reader::new().read_from_container(&mut BufReader::new(file))?
    };
    let field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .ok_or(MetadataError::MissingTag)?;

    let value = match &field.value {
        Value::Ascii(values) => values
            .first()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .ok_or(MetadataError::MissingTag)?,
        _ => return Err(MetadataError::MissingTag),
    };

    parse_exif_datetime(&value)
}

pub fn parse_exif_datetime(value: &str) -> Result<NaiveDateTime, MetadataError> {
    let trimmed = value.trim_end_matches('\0');
    NaiveDateTime::parse_from_str(trimmed, EXIF_DATETIME_FORMAT).map_err(|source| {
        MetadataError::Parse {
            value: trimmed.to_string(),
            source,
        }
    })
}

fn to_local(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local()
}
