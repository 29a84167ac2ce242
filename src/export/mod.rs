pub mod pdf;
pub mod png;

use crate::error::{AuditError, Result};
use ab_glyph::FontVec;
use logbook_audit_common::CardLayout;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Pdf,
    Both,
}

impl ExportFormat {
    fn wants_png(self) -> bool {
        matches!(self, ExportFormat::Png | ExportFormat::Both)
    }

    fn wants_pdf(self) -> bool {
        matches!(self, ExportFormat::Pdf | ExportFormat::Both)
    }
}

impl FromStr for ExportFormat {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "pdf" => Ok(ExportFormat::Pdf),
            "both" => Ok(ExportFormat::Both),
            other => Err(AuditError::Config(format!("未知の出力形式: {}", other))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Both => "both",
        };
        write!(f, "{}", name)
    }
}

/// 描画に使うフォント
pub struct CardFonts {
    pub png: Option<FontVec>,
    pub pdf_path: Option<PathBuf>,
}

impl CardFonts {
    pub fn discover(configured: Option<&Path>) -> Self {
        Self {
            png: png::find_font(configured),
            pdf_path: configured.map(Path::to_path_buf),
        }
    }
}

fn output_path(output_dir: &Path, section_id: &str, extension: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", section_id, extension))
}

/// セクション1つ分を `<section>.png` / `<section>.pdf` に書き出す
pub fn export_section(
    layout: &CardLayout,
    section_id: &str,
    format: ExportFormat,
    output_dir: &Path,
    fonts: &CardFonts,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;
    let mut written = Vec::new();

    if format.wants_png() {
        let path = output_path(output_dir, section_id, "png");
        let bytes = png::render_png(layout, fonts.png.as_ref())?;
        std::fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), "PNG出力");
        written.push(path);
    }

    if format.wants_pdf() {
        let path = output_path(output_dir, section_id, "pdf");
        let bytes = pdf::render_pdf(layout, fonts.pdf_path.as_deref())?;
        std::fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), "PDF出力");
        written.push(path);
    }

    Ok(written)
}
