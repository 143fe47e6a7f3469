use super::batch_runner::{OrganizeRequest, start_organize};
use super::events::{BatchOutcome, BatchSummary, OrganizeEvent};
use super::naming_template::NamingTemplates;
use super::operation_planner::plan_operations;
use crate::config::{UserSettings, add_recent_path, save_settings};
use crate::tools::{scan_photo_files, total_size};
use anyhow::Result;
use console::style;
use crossbeam_channel::Receiver;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use log::{info, warn};
use rust_i18n::t;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 依拍攝日期整理照片的互動介面
pub struct PhotoOrganizer {
    shutdown_signal: Arc<AtomicBool>,
}

impl PhotoOrganizer {
    pub const fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        Self { shutdown_signal }
    }

    pub fn run(&self, settings: &mut UserSettings) -> Result<()> {
        println!("{}", style(t!("organizer.title")).cyan().bold());

        let Some(request) = self.prompt_request(settings)? else {
            return Ok(()); // ESC pressed
        };

        if !self.confirm_start()? {
            println!("{}", style(t!("organizer.cancelled")).yellow());
            return Ok(());
        }

        // 新的一批作業開始前清除上一次的中斷狀態
        self.shutdown_signal.store(false, Ordering::SeqCst);

        println!("{}", style(t!("organizer.scanning")).dim());
        let handle = start_organize(request, Arc::clone(&self.shutdown_signal))?;
        let summary = self.render_events(&handle.events);
        handle.join();

        if let Some(summary) = summary {
            self.print_summary(&summary);
        }

        Ok(())
    }

    /// 只掃描與產生計畫，不複製任何檔案
    pub fn preview(&self, settings: &mut UserSettings) -> Result<()> {
        println!("{}", style(t!("organizer.preview_title")).cyan().bold());

        let Some(request) = self.prompt_request(settings)? else {
            return Ok(());
        };

        println!("{}", style(t!("organizer.scanning")).dim());
        let files = scan_photo_files(&request.source_dir, &request.extensions)?;
        println!(
            "{}",
            style(t!("organizer.found", count = files.len())).green()
        );

        if files.is_empty() {
            println!("{}", style(t!("organizer.no_files")).yellow());
            return Ok(());
        }

        println!("{}", style(t!("organizer.planning")).dim());
        let operations = plan_operations(&files, &request.dest_dir, &request.templates);

        println!();
        for operation in &operations {
            println!(
                "  {} {} {}",
                operation.source.display(),
                style("→").dim(),
                style(relative_to(&operation.destination, &request.dest_dir)).cyan()
            );
        }
        println!();
        println!(
            "{}",
            style(t!(
                "organizer.preview_count",
                total = operations.len(),
                size = HumanBytes(total_size(&files))
            ))
            .green()
        );

        Ok(())
    }

    fn prompt_request(&self, settings: &mut UserSettings) -> Result<Option<OrganizeRequest>> {
        let Some(source) = self.prompt_source(settings)? else {
            return Ok(None);
        };
        settings.source_path = source;

        settings.destination_path =
            self.prompt_text(&t!("organizer.prompt_destination"), &settings.destination_path)?;
        settings.extensions =
            self.prompt_text(&t!("organizer.prompt_extensions"), &settings.extensions)?;
        settings.folder_template = self.prompt_text(
            &t!("organizer.prompt_folder_template"),
            &settings.folder_template,
        )?;
        settings.file_template =
            self.prompt_text(&t!("organizer.prompt_file_template"), &settings.file_template)?;

        let templates = NamingTemplates::new(
            settings.folder_template.clone(),
            settings.file_template.clone(),
        );
        if let Err(e) = templates.validate() {
            println!(
                "{}",
                style(t!("organizer.template_warning", error = e.to_string())).yellow()
            );
        }

        let source_path = settings.source_path.clone();
        add_recent_path(settings, &source_path);
        if let Err(e) = save_settings(settings) {
            warn!("無法儲存設定: {e}");
        }

        Ok(Some(OrganizeRequest::from_settings(settings)))
    }

    fn prompt_source(&self, settings: &UserSettings) -> Result<Option<String>> {
        let recent_paths = &settings.recent_sources;

        if recent_paths.is_empty() {
            let path = self.prompt_text(&t!("organizer.prompt_source"), &settings.source_path)?;
            return Ok(Some(path));
        }

        let mut options: Vec<String> = recent_paths
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let indicator = if Path::new(p).is_dir() { "✓" } else { "✗" };
                format!("{} [{}] {}", i + 1, indicator, p)
            })
            .collect();
        options.push(t!("organizer.new_source").to_string());

        println!("{}", style(t!("common.esc_hint")).dim());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("organizer.prompt_source"))
            .items(&options)
            .default(0)
            .interact_opt()?;

        match selection {
            None => Ok(None),
            Some(idx) if idx < recent_paths.len() => Ok(Some(recent_paths[idx].clone())),
            Some(_) => {
                let path: String = Input::new()
                    .with_prompt(t!("organizer.prompt_source"))
                    .interact_text()?;
                Ok(Some(path.trim().to_string()))
            }
        }
    }

    fn prompt_text(&self, prompt: &str, current: &str) -> Result<String> {
        let input = Input::<String>::new().with_prompt(prompt);
        let input = if current.is_empty() {
            input
        } else {
            input.default(current.to_string())
        };
        Ok(input.interact_text()?.trim().to_string())
    }

    fn confirm_start(&self) -> Result<bool> {
        let confirm = Confirm::new()
            .with_prompt(t!("organizer.confirm"))
            .default(true)
            .interact()?;
        Ok(confirm)
    }

    /// 依序顯示事件直到收到終止事件，回傳最終統計
    fn render_events(&self, events: &Receiver<OrganizeEvent>) -> Option<BatchSummary> {
        let mut progress_bar: Option<ProgressBar> = None;

        for event in events.iter() {
            match event {
                OrganizeEvent::FilesDiscovered { count } => {
                    println!("{}", style(t!("organizer.found", count = count)).green());
                    if count == 0 {
                        println!("{}", style(t!("organizer.no_files")).yellow());
                    }
                }
                OrganizeEvent::OperationsPlanned { total } => {
                    if total > 0 {
                        println!("{}", style(t!("organizer.copying", total = total)).cyan());
                        progress_bar = Some(create_progress_bar(total));
                    }
                }
                OrganizeEvent::Copied {
                    source_name,
                    destination_name,
                } => {
                    let line = t!(
                        "organizer.copied_line",
                        source = source_name,
                        destination = destination_name
                    );
                    print_progress_line(progress_bar.as_ref(), &style(line).dim().to_string());
                }
                OrganizeEvent::CopyFailed(failure) => {
                    let line = t!(
                        "organizer.failed_line",
                        source = failure.source_name,
                        error = failure.error
                    );
                    print_progress_line(progress_bar.as_ref(), &style(line).red().to_string());
                }
                OrganizeEvent::Finished(summary) => {
                    if let Some(pb) = &progress_bar {
                        pb.finish_with_message(t!("organizer.finished").to_string());
                    }
                    return Some(summary);
                }
                OrganizeEvent::Cancelled(summary) => {
                    if let Some(pb) = &progress_bar {
                        pb.abandon_with_message(t!("organizer.interrupted").to_string());
                    }
                    return Some(summary);
                }
                OrganizeEvent::Error(message) => {
                    if let Some(pb) = &progress_bar {
                        pb.abandon();
                    }
                    eprintln!(
                        "{} {}",
                        style(t!("organizer.error_prefix")).red().bold(),
                        message
                    );
                    return None;
                }
            }
        }

        None
    }

    fn print_summary(&self, summary: &BatchSummary) {
        println!();
        println!("{}", style(t!("organizer.summary_title")).cyan().bold());
        println!(
            "  {}",
            t!(
                "organizer.summary_copied",
                copied = style(summary.copied).green(),
                total = summary.total
            )
        );

        if summary.failed() > 0 {
            println!(
                "  {}",
                t!("organizer.summary_failed", count = style(summary.failed()).red())
            );
            for failure in &summary.failures {
                println!(
                    "    {} {}: {}",
                    style("•").dim(),
                    failure.source_name,
                    failure.error
                );
            }
        }

        if summary.skipped > 0 {
            println!(
                "  {}",
                t!(
                    "organizer.summary_skipped",
                    count = style(summary.skipped).yellow()
                )
            );
        }

        let outcome = match summary.outcome() {
            BatchOutcome::NothingToDo => t!("organizer.outcome_nothing"),
            BatchOutcome::FullSuccess => t!("organizer.outcome_full"),
            BatchOutcome::PartialSuccess => t!("organizer.outcome_partial"),
        };
        println!("\n{}", style(outcome).bold());

        info!(
            "照片整理結束 - 總計: {}, 複製: {}, 失敗: {}, 略過: {}",
            summary.total,
            summary.copied,
            summary.failed(),
            summary.skipped
        );
    }
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    progress_bar
}

/// 有進度條時透過進度條輸出，避免畫面被打亂
fn print_progress_line(progress_bar: Option<&ProgressBar>, line: &str) {
    match progress_bar {
        Some(pb) => {
            pb.println(line);
            pb.inc(1);
        }
        None => println!("{line}"),
    }
}

fn relative_to(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
