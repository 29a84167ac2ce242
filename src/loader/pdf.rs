//! PDFページのラスタライズ（PDFium）
//!
//! PDFiumは実行時に動的ロードする。探索順:
//! 1. `PDFIUM_DYNAMIC_LIB_PATH`
//! 2. 実行ファイルと同じフォルダ
//! 3. システムライブラリ

use super::PageImage;
use crate::error::{AuditError, Result};
use image::ImageFormat;
use pdfium_render::prelude::*;
use std::io::Cursor;

/// ページ寸法（pt）に掛ける拡大率
pub const PDF_UPSCALE: f32 = 2.0;

fn load_pdfium() -> Result<Pdfium> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        let bindings = Pdfium::bind_to_library(&path)
            .map_err(|e| AuditError::PdfRender(format!("PDFiumをロードできません ({}): {}", path, e)))?;
        return Ok(Pdfium::new(bindings));
    }

    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(|d| d.to_path_buf())) {
        let lib_path = Pdfium::pdfium_platform_library_name_at_path(exe_dir.to_string_lossy().as_ref());
        if let Ok(bindings) = Pdfium::bind_to_library(&lib_path) {
            tracing::debug!(dir = %exe_dir.display(), "実行ファイルの隣からPDFiumをロード");
            return Ok(Pdfium::new(bindings));
        }
    }

    let bindings = Pdfium::bind_to_system_library().map_err(|e| {
        AuditError::PdfRender(format!(
            "PDFiumライブラリが見つかりません。PDFIUM_DYNAMIC_LIB_PATH を設定してください: {}",
            e
        ))
    })?;
    Ok(Pdfium::new(bindings))
}

/// ページ名: `<ファイル名>_page_<1始まりの番号>`
pub fn page_name(file_name: &str, page_index: usize) -> String {
    format!("{}_page_{}", file_name, page_index + 1)
}

/// PDFの全ページをPNG画像に変換
pub fn rasterize_pdf(file_name: &str, data: &[u8]) -> Result<Vec<PageImage>> {
    let pdfium = load_pdfium()?;
    let document = pdfium
        .load_pdf_from_byte_slice(data, None)
        .map_err(|e| AuditError::PdfRender(format!("{}: {}", file_name, e)))?;

    let mut images = Vec::new();

    for (index, page) in document.pages().iter().enumerate() {
        let width = (page.width().value * PDF_UPSCALE).round() as i32;
        let height = (page.height().value * PDF_UPSCALE).round() as i32;

        let config = PdfRenderConfig::new()
            .set_target_width(width.max(1))
            .set_target_height(height.max(1));

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| AuditError::PdfRender(format!("{} p.{}: {}", file_name, index + 1, e)))?;

        let mut cursor = Cursor::new(Vec::new());
        bitmap
            .as_image()
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| AuditError::ImageLoad(format!("PNGエンコード失敗: {}", e)))?;

        tracing::debug!(page = index + 1, width, height, "PDFページをラスタライズ");

        images.push(PageImage {
            name: page_name(file_name, index),
            data: cursor.into_inner(),
            subtype: "png".to_string(),
        });
    }

    Ok(images)
}
