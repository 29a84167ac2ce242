//! カードのPNG描画
//!
//! 白背景にタイトルと「ラベル: 値」の行を描く。同じレイアウトからは常に同じバイト列になる。
//! フォントは 設定 → システム候補 → 同梱の DejaVu Sans の順で決まり、文字は必ず描かれる。

use crate::error::{AuditError, Result};
use ab_glyph::{Font, FontRef, FontVec, PxScale};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut};
use imageproc::rect::Rect;
use logbook_audit_common::layout::{mm_to_px, pt_to_px, BODY_FONT_PT, MARGIN_MM, TITLE_FONT_PT, TITLE_HEIGHT_MM};
use logbook_audit_common::CardLayout;
use std::io::Cursor;
use std::path::{Path, PathBuf};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const BORDER: Rgba<u8> = Rgba([160, 160, 160, 255]);

/// 最後の手段の同梱フォント
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// フォント候補（設定がないとき順に試す）
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn load_font_file(path: &Path) -> Option<FontVec> {
    let bytes = std::fs::read(path).ok()?;
    match FontVec::try_from_vec(bytes) {
        Ok(font) => Some(font),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "フォントを読み込めません");
            None
        }
    }
}

/// 描画用フォントを探す（設定 → システム候補）
pub fn find_font(configured: Option<&Path>) -> Option<FontVec> {
    let candidates = configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

    for path in candidates {
        if let Some(font) = load_font_file(&path) {
            tracing::debug!(path = %path.display(), "フォント使用");
            return Some(font);
        }
    }

    tracing::warn!("システムフォントが見つかりません。同梱フォントで描画します");
    None
}

fn draw_text_lines<F: Font>(img: &mut RgbaImage, layout: &CardLayout, x: i32, font: &F) {
    let title_px = pt_to_px(TITLE_FONT_PT);
    let body_px = pt_to_px(BODY_FONT_PT);

    let title_top = mm_to_px(layout.title_y_mm) as f32 - title_px;
    draw_text_mut(img, BLACK, x, title_top as i32, PxScale::from(title_px), font, &layout.title);

    for line in &layout.lines {
        let top = mm_to_px(line.y_mm) as f32 - body_px;
        draw_text_mut(img, BLACK, x, top as i32, PxScale::from(body_px), font, &line.text());
    }
}

/// レイアウトをPNGバイト列に描画
///
/// `y_mm` はベースライン位置なので、フォントの高さ分だけ上にずらして描く。
/// `font` が None なら同梱フォントを使う。
pub fn render_png(layout: &CardLayout, font: Option<&FontVec>) -> Result<Vec<u8>> {
    let width = mm_to_px(layout.width_mm);
    let height = mm_to_px(layout.height_mm);
    let mut img = RgbaImage::from_pixel(width, height, WHITE);

    let inset = mm_to_px(MARGIN_MM / 2.0);
    if width > inset * 2 && height > inset * 2 {
        let frame = Rect::at(inset as i32, inset as i32).of_size(width - inset * 2, height - inset * 2);
        draw_hollow_rect_mut(&mut img, frame, BORDER);
    }

    let x = mm_to_px(layout.x_mm) as f32;
    let rule_y = mm_to_px(MARGIN_MM + TITLE_HEIGHT_MM) as f32;
    draw_line_segment_mut(&mut img, (x, rule_y), (width as f32 - x, rule_y), BORDER);

    match font {
        Some(font) => draw_text_lines(&mut img, layout, x as i32, font),
        None => {
            let bundled = FontRef::try_from_slice(BUNDLED_FONT)
                .map_err(|e| AuditError::PngGeneration(format!("同梱フォントを読み込めません: {}", e)))?;
            draw_text_lines(&mut img, layout, x as i32, &bundled);
        }
    }

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| AuditError::PngGeneration(format!("PNGエンコード失敗: {}", e)))?;
    Ok(bytes)
}
