//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `quicknote_core` wiring: capture
//!   one note into a local vault directory and print the resulting timeline.

use chrono::Local;
use quicknote_core::{
    DailyNoteService, FsVault, LogNotifier, QuickNoteSettings, DEFAULT_TIMELINE_DAYS,
};

fn main() {
    let mut args = std::env::args().skip(1);
    let vault_dir = args.next().unwrap_or_else(|| "vault".to_string());
    let content = args.collect::<Vec<_>>().join(" ");

    if let Err(err) = std::fs::create_dir_all(&vault_dir) {
        eprintln!("cannot create vault directory `{vault_dir}`: {err}");
        std::process::exit(1);
    }

    let service = DailyNoteService::new(
        FsVault::new(&vault_dir),
        LogNotifier,
        QuickNoteSettings::default(),
    );

    let now = Local::now().naive_local();
    if !content.trim().is_empty() {
        match service.capture(&content, Vec::new(), now) {
            Ok(date_key) => println!("captured into {date_key}"),
            Err(err) => {
                eprintln!("capture failed: {err}");
                std::process::exit(1);
            }
        }
    }

    let window = service.timeline(now.date(), DEFAULT_TIMELINE_DAYS);
    println!(
        "quicknote_core version={} entries={}",
        quicknote_core::core_version(),
        window.entry_count()
    );
    for day in &window.days {
        println!("{}", day.date_key);
        for entry in &day.entries {
            println!("  {} {}", entry.timestamp, entry.content);
        }
    }
}
