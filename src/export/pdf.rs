use crate::error::{AuditError, Result};
use logbook_audit_common::layout::{BODY_FONT_PT, TITLE_FONT_PT};
use logbook_audit_common::CardLayout;
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

fn pdf_error(context: &str, e: impl std::fmt::Display) -> AuditError {
    AuditError::PdfGeneration(format!("{}: {}", context, e))
}

/// 外部TTFを埋め込む（読めなければ None）
fn external_font(doc: &PdfDocumentReference, path: &Path) -> Option<IndirectFontRef> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "フォントを開けません。Helveticaを使います");
            return None;
        }
    };
    match doc.add_external_font(file) {
        Ok(font) => Some(font),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "フォント埋め込み失敗。Helveticaを使います");
            None
        }
    }
}

/// レイアウトをカードサイズ1ページのPDFにする
///
/// PDFの原点は左下なので、上端基準の `y_mm` を反転して置く。
pub fn render_pdf(layout: &CardLayout, font_path: Option<&Path>) -> Result<Vec<u8>> {
    let (doc, page1, layer1) = PdfDocument::new(
        &layout.title,
        Mm(layout.width_mm),
        Mm(layout.height_mm),
        "Layer 1",
    );
    let layer = doc.get_page(page1).get_layer(layer1);

    let font = match font_path.and_then(|p| external_font(&doc, p)) {
        Some(font) => font,
        None => doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| pdf_error("フォント追加エラー", e))?,
    };

    let from_top = |y_mm: f32| Mm(layout.height_mm - y_mm);

    layer.use_text(
        layout.title.as_str(),
        TITLE_FONT_PT,
        Mm(layout.x_mm),
        from_top(layout.title_y_mm),
        &font,
    );

    for line in &layout.lines {
        layer.use_text(line.text(), BODY_FONT_PT, Mm(layout.x_mm), from_top(line.y_mm), &font);
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(|e| pdf_error("PDF保存エラー", e))?;
    buf.into_inner().map_err(|e| pdf_error("PDFバッファエラー", e))
}
