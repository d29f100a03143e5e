//! fxmlc CLI UI primitives.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use fxmlc_compiler::{CompilerWarning, UnitReport, UnitStatus};

/// Terminal palette
pub mod colors {
    use console::Color;

    pub const CYAN: Color = Color::Color256(51);
    pub const MAGENTA: Color = Color::Color256(201);
    pub const AMBER: Color = Color::Color256(214);
    pub const NEON_GREEN: Color = Color::Color256(82);
    pub const DIM: Color = Color::Color256(240);
}

pub mod symbols {
    pub const DIAMOND: &str = "\u{25C6}"; // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}"; // ◇
    pub const TARGET_FILLED: &str = "\u{25C9}"; // ◉
    pub const TRIANGLE: &str = "\u{25B8}"; // ▸
    pub const DOT: &str = "\u{00B7}"; // ·
    pub const ARROW: &str = "\u{2500}\u{25B8}"; // ─▸
}

/// Clickable file link (OSC 8 hyperlink).
pub fn file_link(path: &Path) -> String {
    let abs_path = std::fs::canonicalize(path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string());
    format!("\x1b]8;;file://{}\x07{}\x1b]8;;\x07", abs_path, path.display())
}

pub fn print_compact_header(version: &str) {
    println!(
        "  {} {} {}",
        style(symbols::DIAMOND).fg(colors::CYAN),
        style("fxmlc").fg(colors::CYAN).bold(),
        style(version).dim()
    );
}

pub fn success(msg: &str) {
    println!("  {} {}", style(symbols::TARGET_FILLED).fg(colors::NEON_GREEN), msg);
}

pub fn error(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::MAGENTA),
        style(msg).fg(colors::MAGENTA)
    );
}

pub fn warning(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::DIAMOND_OUTLINE).fg(colors::AMBER),
        style(msg).fg(colors::AMBER)
    );
}

pub fn info(msg: &str) {
    println!("  {} {}", style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN), msg);
}

pub fn dim(msg: &str) {
    println!("  {}", style(msg).fg(colors::DIM));
}

pub fn warnings(list: &[CompilerWarning]) {
    for w in list {
        warning(&w.to_string());
    }
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("\u{25CE}\u{25C9}\u{25CE}\u{25C9}") // ◎◉◎◉
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(150));
    pb
}

pub fn box_header(title: &str) {
    let width = 55;
    let title_padded = format!(" {} ", title);
    let dashes = width - title_padded.chars().count().min(width - 4) - 4;

    println!(
        "  {}{}{}{}",
        style("\u{256D}\u{2500}").fg(colors::CYAN), // ╭─
        style(title_padded).fg(colors::CYAN).bold(),
        style("\u{2500}".repeat(dashes)).fg(colors::CYAN),
        style("\u{256E}").fg(colors::CYAN) // ╮
    );
}

pub fn box_line(content: &str) {
    let width: usize = 53;
    let padding = width.saturating_sub(console::measure_text_width(content));
    println!(
        "  {} {}{}{}",
        style("\u{2502}").fg(colors::CYAN), // │
        content,
        " ".repeat(padding),
        style("\u{2502}").fg(colors::CYAN)
    );
}

pub fn box_footer() {
    let width = 55;
    println!(
        "  {}{}{}",
        style("\u{2570}").fg(colors::CYAN), // ╰
        style("\u{2500}".repeat(width - 2)).fg(colors::CYAN),
        style("\u{256F}").fg(colors::CYAN) // ╯
    );
}

/// One row of the batch summary.
pub fn unit_line(unit: &UnitReport) -> String {
    let name = unit
        .source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let (mark, label) = match &unit.status {
        UnitStatus::Created => (style(symbols::TRIANGLE).fg(colors::NEON_GREEN), "created"),
        UnitStatus::Merged => (style(symbols::TRIANGLE).fg(colors::CYAN), "merged"),
        UnitStatus::Failed(_) => (style(symbols::TRIANGLE).fg(colors::MAGENTA), "failed"),
    };
    let warnings = if unit.warnings.is_empty() {
        String::new()
    } else {
        format!(" {} {} warning(s)", symbols::DOT, unit.warnings.len())
    };

    format!(" {} {:<32} {}{}", mark, truncate(&name, 32), label, warnings)
}

pub fn timing(label: &str, duration_ms: u128) {
    println!(
        "  {} {} in {}ms",
        style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN),
        label,
        duration_ms
    );
}

/// "Nope" header for failed runs.
pub fn nope_header() {
    println!();
    println!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::MAGENTA).bold(),
        style("Nope.").fg(colors::MAGENTA).bold()
    );
    println!();
}

pub fn looking_good() {
    println!(
        "  {} {}",
        style(symbols::TARGET_FILLED).fg(colors::NEON_GREEN),
        style("Looking good.").bold()
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}\u{2026}", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_file_link_format() {
        let link = file_link(Path::new("Main.fxml"));
        assert!(link.contains("Main.fxml"));
        assert!(link.contains("\x1b]8;;"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Main.fxml", 32), "Main.fxml");
        assert_eq!(truncate("abcdef", 4), "abc\u{2026}");
    }

    #[test]
    fn test_unit_line_mentions_status_and_warnings() {
        let unit = UnitReport {
            source: PathBuf::from("views/com.acme.Main.fxml"),
            target: None,
            status: UnitStatus::Merged,
            warnings: Vec::new(),
        };
        let line = console::strip_ansi_codes(&unit_line(&unit)).to_string();

        assert!(line.contains("com.acme.Main.fxml"));
        assert!(line.contains("merged"));
        assert!(!line.contains("warning"));
    }
}
