mod copy_executor;
mod date_resolver;
mod extension_filter;
mod file_scanner;
mod path_validator;

pub use copy_executor::{CopyError, copy_preserving_times};
pub use date_resolver::{
    CaptureDate, DateSource, EXIF_DATETIME_FORMAT, MetadataError, TIFF_HEADER_LIMIT,
    parse_exif_datetime, read_exif_capture_date, resolve_capture_date,
};
pub use extension_filter::{
    DEFAULT_EXTENSIONS, DEFAULT_EXTENSIONS_TEXT, ExtensionFilter, lowercase_extension,
};
pub use file_scanner::{ScannedFile, scan_photo_files, total_size};
pub use path_validator::validate_directory_exists;
