//! Table and JSON output for CLI commands.

use anyhow::Context;
use kontiki_core::{CategoryGroup, DocumentCategory, FolderView, MediaKind};
use kontiki_repository::{ComplianceSummary, Notification, NotificationLevel};
use serde::Serialize;

use crate::truncate_string;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn media_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
        MediaKind::Document => "document",
    }
}

pub fn render_categories(categories: &[DocumentCategory]) -> String {
    if categories.is_empty() {
        return "No categories.".to_string();
    }

    let mut lines = vec![
        format!(
            "{:<32} {:<34} {:<32} {:<11} {:>8}",
            "ID", "Tag", "Name", "Group", "Required"
        ),
        "-".repeat(121),
    ];
    for category in categories {
        lines.push(format!(
            "{:<32} {:<34} {:<32} {:<11} {:>8}",
            truncate_string(category.id, 32),
            truncate_string(category.document_type_tag, 34),
            truncate_string(category.display_name, 32),
            category.group.to_string(),
            yes_no(category.required)
        ));
    }
    lines.join("\n")
}

/// Folders listed under their group headings, with file counts.
pub fn render_folders(site_id: &str, folders: &[FolderView]) -> String {
    let mut lines = vec![format!("=== Site {} ===", site_id)];

    for group in CategoryGroup::ALL {
        let in_group: Vec<&FolderView> = folders
            .iter()
            .filter(|folder| folder.category.group == group)
            .collect();
        if in_group.is_empty() {
            continue;
        }

        lines.push(String::new());
        lines.push(group.display_name().to_string());
        lines.push(format!(
            "  {:<32} {:<32} {:>6} {:>8}",
            "ID", "Name", "Files", "Required"
        ));
        lines.push(format!("  {}", "-".repeat(81)));
        for folder in in_group {
            lines.push(format!(
                "  {:<32} {:<32} {:>6} {:>8}",
                truncate_string(folder.category.id, 32),
                truncate_string(folder.category.display_name, 32),
                folder.files.len(),
                yes_no(folder.category.required)
            ));
        }
    }

    lines.join("\n")
}

pub fn render_folder(folder: &FolderView) -> String {
    let mut lines = vec![format!(
        "=== {} ({}) ===",
        folder.category.display_name, folder.category.id
    )];

    if folder.is_empty() {
        lines.push("No files uploaded.".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "{:<12} {:<36} {:<8} {:>12} {:<20} {:<24}",
        "ID", "Name", "Kind", "Size", "Uploaded At", "Uploaded By"
    ));
    lines.push("-".repeat(117));
    for file in &folder.files {
        lines.push(format!(
            "{:<12} {:<36} {:<8} {:>12} {:<20} {:<24}",
            truncate_string(&file.id, 12),
            truncate_string(&file.name, 36),
            media_label(file.media_kind),
            file.size_label,
            file.uploaded_at_utc.format("%Y-%m-%d %H:%M:%S").to_string(),
            truncate_string(&file.uploaded_by_label, 24)
        ));
    }
    lines.join("\n")
}

pub fn render_summary(summary: &ComplianceSummary) -> String {
    let mut lines = Vec::new();
    if let Some(site_id) = &summary.site_id {
        lines.push(format!("=== Site {} ===", site_id));
    }

    for group in &summary.groups {
        lines.push(format!(
            "{}: {}/{} required categories filed, {} files",
            group.display_name,
            group.satisfied(),
            group.required,
            group.files
        ));
        for category in &group.missing {
            lines.push(format!(
                "  missing: {} ({})",
                category.display_name, category.id
            ));
        }
    }

    let missing = summary.missing().count();
    if missing == 0 {
        lines.push("Status: complete".to_string());
    } else {
        lines.push(format!(
            "Status: incomplete ({} required categories missing)",
            missing
        ));
    }
    lines.join("\n")
}

pub fn render_notification(notification: &Notification) -> String {
    let level = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
    };
    let mut out = format!(
        "[{}] {}: {}",
        level, notification.title, notification.message
    );
    if let Some(action) = notification.suggested_action {
        out.push_str(&format!("\n  hint: {}", action));
    }
    out
}

/// Print a notification; errors go to stderr in table mode.
pub fn print_notification(notification: &Notification, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(notification),
        OutputFormat::Table => {
            let text = render_notification(notification);
            if notification.is_error() {
                eprintln!("{}", text);
            } else {
                println!("{}", text);
            }
            Ok(())
        }
    }
}
