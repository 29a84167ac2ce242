//! 端末表示
//!
//! 監査結果のタブを等幅テキストの表として出力し、バッチ進捗をプログレスバーで表示する。

use crate::extractor::BatchObserver;
use indicatif::{ProgressBar, ProgressStyle};
use logbook_audit_common::{render_tab, AuditReport, AuditTab, TabContent, Table};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// 端末上の表示幅（絵文字・全角は2）
fn cell_width(text: &str) -> usize {
    text.width()
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

/// 表を罫線つきのテキストに整形
pub fn format_table(table: &Table) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| cell_width(h)).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell_width(cell));
            }
        }
    }

    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut out = String::new();
    let header = table
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "{}", header.trim_end());
    let _ = writeln!(out, "{}", separator);

    for row in &table.rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect::<Vec<_>>()
            .join(" | ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// タブ1つ分の表示テキスト
pub fn format_tab(report: &AuditReport, tab: AuditTab) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tab.label());
    let _ = writeln!(out, "== {} ==", tab.heading());

    match render_tab(report, tab) {
        TabContent::Table(table) => out.push_str(&format_table(&table)),
        TabContent::Empty(message) => {
            let _ = writeln!(out, "{}", message);
        }
        TabContent::Sections(sections) => {
            for (title, body) in sections {
                let _ = writeln!(out, "\n[{}]", title);
                let _ = writeln!(out, "{}", body);
            }
        }
    }
    out
}

/// 全タブを順に表示
pub fn print_report(report: &AuditReport) {
    for tab in AuditTab::ALL {
        println!("{}", format_tab(report, tab));
    }
}

pub fn print_tab(report: &AuditReport, tab: AuditTab) {
    println!("{}", format_tab(report, tab));
}

/// indicatif でバッチ進捗を表示
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    pub fn new(total_batches: usize, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total_batches as u64)
        };
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl BatchObserver for BatchProgress {
    fn batch_started(&self, number: usize, total: usize, size: usize) {
        self.bar
            .set_message(format!("Processing batch {} of {} ({} images)...", number, total, size));
    }

    fn batch_finished(&self, number: usize, total: usize) {
        self.bar.inc(1);
        self.bar.println(format!("✔ Completed batch {} of {}", number, total));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table_aligns_columns() {
        let table = Table {
            headers: vec!["Field", "Value"],
            rows: vec![
                vec!["Make/Model".to_string(), "Piper PA-28".to_string()],
                vec!["Year".to_string(), "1978".to_string()],
            ],
        };
        let text = format_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Field      | Value"));
        assert!(lines[3].starts_with("Year       | 1978"));
    }

    #[test]
    fn test_wide_marks_keep_columns_aligned() {
        let table = Table {
            headers: vec!["Mark", "Note"],
            rows: vec![
                vec!["⚠️ Yes".to_string(), "gap".to_string()],
                vec!["✅ No".to_string(), "ok".to_string()],
                vec!["❌ Missing".to_string(), "337".to_string()],
            ],
        };
        let text = format_table(&table);
        let separator_columns: Vec<usize> = text
            .lines()
            .filter_map(|line| line.find(" | ").map(|i| line[..i].width()))
            .collect();
        assert_eq!(separator_columns.len(), 4);
        assert!(separator_columns.iter().all(|c| *c == separator_columns[0]));
    }

    #[test]
    fn test_gap_flag_shows_in_condition_tab() {
        let mut report = AuditReport::default();
        report.logbook_condition.gaps_in_entries = true;
        let text = format_tab(&report, AuditTab::LogbookCondition);
        assert!(text.contains("⚠️ Yes"));
    }

    #[test]
    fn test_empty_inspections_message() {
        let text = format_tab(&AuditReport::default(), AuditTab::Inspections);
        assert!(text.contains("No inspection information found in the images."));
    }
}
