//! 整合測試 - 以暫存資料夾驗證掃描、計畫與複製的完整流程

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use auto_photo_organize::component::photo_organizer::{
    BatchOutcome, NamingTemplates, OrganizeEvent, OrganizeRequest, run_batch,
};
use auto_photo_organize::tools::{ExtensionFilter, scan_photo_files};
use chrono::{Local, NaiveDate, TimeZone};
use filetime::FileTime;
use tempfile::TempDir;

/// 建立檔案並把修改時間設為指定的本地時間
fn write_photo(dir: &Path, name: &str, content: &str, ymd: (i32, u32, u32), hour: u32) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();

    let naive = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap();
    let timestamp = Local.from_local_datetime(&naive).single().unwrap().timestamp();
    filetime::set_file_mtime(&path, FileTime::from_unix_time(timestamp, 0)).unwrap();
    path
}

/// 三張照片：2023-01-01 10:00、11:00 與 2023-01-02 09:00
fn three_photos(source: &Path) {
    write_photo(source, "morning.jpg", "morning", (2023, 1, 1), 10);
    write_photo(source, "noon.jpg", "noon", (2023, 1, 1), 11);
    write_photo(source, "next_day.png", "next", (2023, 1, 2), 9);
}

fn request(source: &Path, dest: &Path, folder: &str, file: &str) -> OrganizeRequest {
    OrganizeRequest {
        source_dir: source.to_path_buf(),
        dest_dir: dest.to_path_buf(),
        extensions: ExtensionFilter::default(),
        templates: NamingTemplates::new(folder, file),
    }
}

fn run(request: &OrganizeRequest) -> (Vec<OrganizeEvent>, BatchOutcome) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let summary = run_batch(request, &tx, &AtomicBool::new(false)).unwrap();
    drop(tx);
    (rx.iter().collect(), summary.outcome())
}

#[test]
fn test_date_folders_with_padded_sequence() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    three_photos(source.path());

    let (_, outcome) = run(&request(
        source.path(),
        dest.path(),
        "%Y/%m/%d",
        "IMG_{seq:04d}",
    ));

    assert_eq!(outcome, BatchOutcome::FullSuccess);
    let dest = dest.path();
    assert_eq!(
        fs::read_to_string(dest.join("2023/01/01/IMG_0001.jpg")).unwrap(),
        "morning"
    );
    assert_eq!(
        fs::read_to_string(dest.join("2023/01/01/IMG_0002.jpg")).unwrap(),
        "noon"
    );
    assert_eq!(
        fs::read_to_string(dest.join("2023/01/02/IMG_0001.png")).unwrap(),
        "next"
    );
}

#[test]
fn test_flat_date_folders_with_plain_sequence() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    three_photos(source.path());

    let (_, outcome) = run(&request(source.path(), dest.path(), "%Y-%m-%d", "Photo_{seq}"));

    assert_eq!(outcome, BatchOutcome::FullSuccess);
    let dest = dest.path();
    assert_eq!(
        fs::read_to_string(dest.join("2023-01-01/Photo_1.jpg")).unwrap(),
        "morning"
    );
    assert_eq!(
        fs::read_to_string(dest.join("2023-01-01/Photo_2.jpg")).unwrap(),
        "noon"
    );
    assert_eq!(
        fs::read_to_string(dest.join("2023-01-02/Photo_1.png")).unwrap(),
        "next"
    );
}

#[test]
fn test_empty_source_finishes_without_copies() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    let (events, outcome) = run(&request(source.path(), dest.path(), "%Y/%m/%d", "IMG_{seq:04d}"));

    assert_eq!(outcome, BatchOutcome::NothingToDo);
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], OrganizeEvent::FilesDiscovered { count: 0 });
    assert_eq!(events[1], OrganizeEvent::OperationsPlanned { total: 0 });
    match &events[2] {
        OrganizeEvent::Finished(summary) => {
            assert_eq!(summary.total, 0);
            assert_eq!(summary.copied, 0);
        }
        other => panic!("預期 Finished，實際為 {other:?}"),
    }
    assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 0);
}

#[test]
fn test_unusable_file_template_falls_back_to_img_names() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    three_photos(source.path());

    let (_, outcome) = run(&request(source.path(), dest.path(), "%Y/%m/%d", "{camera}_{seq}"));

    assert_eq!(outcome, BatchOutcome::FullSuccess);
    let dest = dest.path();
    assert!(dest.join("2023/01/01/IMG_0001.jpg").exists());
    assert!(dest.join("2023/01/01/IMG_0002.jpg").exists());
    assert!(dest.join("2023/01/02/IMG_0001.png").exists());
}

#[test]
fn test_copied_files_keep_modification_time() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let original = write_photo(source.path(), "a.jpg", "a", (2022, 6, 15), 8);

    run(&request(source.path(), dest.path(), "%Y/%m/%d", "IMG_{seq:04d}"));

    let copied = dest.path().join("2022/06/15/IMG_0001.jpg");
    let original_mtime = FileTime::from_last_modification_time(&fs::metadata(&original).unwrap());
    let copied_mtime = FileTime::from_last_modification_time(&fs::metadata(&copied).unwrap());
    assert_eq!(original_mtime.unix_seconds(), copied_mtime.unix_seconds());
    assert!(original.exists());
}

#[test]
fn test_extension_filter_is_case_insensitive() {
    let source = TempDir::new().unwrap();
    fs::write(source.path().join("UPPER.JPG"), "1").unwrap();
    fs::write(source.path().join("lower.jpg"), "2").unwrap();
    fs::write(source.path().join("raw.Nef"), "3").unwrap();
    fs::write(source.path().join("notes.txt"), "4").unwrap();

    let dotted = scan_photo_files(source.path(), &ExtensionFilter::parse(".jpg, .nef")).unwrap();
    let bare = scan_photo_files(source.path(), &ExtensionFilter::parse("JPG,nef")).unwrap();

    assert_eq!(dotted.len(), 3);
    assert_eq!(bare.len(), 3);
    assert!(dotted.iter().all(|f| f.extension != ".txt"));
}

#[test]
fn test_nested_source_folders_are_scanned() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    let nested = source.path().join("trip/day1");
    fs::create_dir_all(&nested).unwrap();
    write_photo(&nested, "beach.jpg", "beach", (2021, 7, 4), 12);
    write_photo(source.path(), "home.jpg", "home", (2021, 7, 4), 18);

    let (_, outcome) = run(&request(source.path(), dest.path(), "%Y/%m", "IMG_{seq:03d}"));

    assert_eq!(outcome, BatchOutcome::FullSuccess);
    assert_eq!(
        fs::read_to_string(dest.path().join("2021/07/IMG_001.jpg")).unwrap(),
        "beach"
    );
    assert_eq!(
        fs::read_to_string(dest.path().join("2021/07/IMG_002.jpg")).unwrap(),
        "home"
    );
}
