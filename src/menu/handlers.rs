use crate::component::PhotoOrganizer;
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_photo_organizer(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let organizer = PhotoOrganizer::new(Arc::clone(shutdown_signal));

    if let Err(e) = organizer.run(&mut config.settings) {
        eprintln!("{} {}", style(t!("main_menu.error_prefix")).red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_plan_preview(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<()> {
    let organizer = PhotoOrganizer::new(Arc::clone(shutdown_signal));

    if let Err(e) = organizer.preview(&mut config.settings) {
        eprintln!("{} {}", style(t!("main_menu.error_prefix")).red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn show_format_help(term: &Term) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style(t!("help.folder_title")).cyan().bold());
    println!("{}", t!("help.folder_intro"));
    for (code, description) in [
        ("%Y", t!("help.code_year")),
        ("%m", t!("help.code_month")),
        ("%d", t!("help.code_day")),
        ("%H", t!("help.code_hour")),
        ("%M", t!("help.code_minute")),
        ("%S", t!("help.code_second")),
    ] {
        println!("  {} {}", style(code).green().bold(), description);
    }
    println!(
        "{} {}",
        style(t!("help.example")).dim(),
        "%Y/%m/%d -> 2023/10/27"
    );

    println!();
    println!("{}", style(t!("help.file_title")).cyan().bold());
    println!("{}", t!("help.file_intro"));
    for (code, description) in [
        ("{seq}", t!("help.seq_plain")),
        ("{seq:04d}", t!("help.seq_four")),
        ("{seq:03d}", t!("help.seq_three")),
    ] {
        println!("  {} {}", style(code).green().bold(), description);
    }
    println!(
        "{} {}",
        style(t!("help.example")).dim(),
        "IMG_{seq:04d} -> IMG_0001.jpg"
    );
    println!("{}", style(t!("help.fallback")).dim());

    pause(term)?;
    Ok(())
}
