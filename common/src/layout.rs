//! レイアウト設定モジュール
//!
//! 資格証カードのmm基準レイアウト定義（PNG/PDF共通）

// ============================================
// mm基準レイアウト（Source of Truth）
// ============================================

/// カード幅（A6横幅, mm）
pub const CARD_WIDTH_MM: f32 = 105.0;
/// カード最小高さ（A6, mm）
pub const CARD_MIN_HEIGHT_MM: f32 = 148.0;

/// 余白（mm）
pub const MARGIN_MM: f32 = 8.0;

/// タイトル行の高さ（mm）
pub const TITLE_HEIGHT_MM: f32 = 12.0;
/// 項目1行の高さ（mm）
pub const LINE_HEIGHT_MM: f32 = 7.0;

/// フォントサイズ（pt）
pub const TITLE_FONT_PT: f32 = 14.0;
pub const BODY_FONT_PT: f32 = 10.0;

// ============================================
// 変換係数
// ============================================

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// PNG出力の解像度
pub const PNG_DPI: f32 = 150.0;

/// mm → px変換（PNG_DPI基準）
pub const MM_TO_PX: f32 = PNG_DPI / 25.4;

// ============================================
// ヘルパー関数
// ============================================

/// mm → pt 変換
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// mm → px 変換
#[inline]
pub fn mm_to_px(mm: f32) -> u32 {
    (mm * MM_TO_PX).round() as u32
}

/// pt → px 変換（フォントサイズ用）
#[inline]
pub fn pt_to_px(pt: f32) -> f32 {
    pt * PNG_DPI / 72.0
}

/// 行数からカード高さを計算（mm）
pub fn card_height_mm(line_count: usize) -> f32 {
    let content = MARGIN_MM * 2.0 + TITLE_HEIGHT_MM + LINE_HEIGHT_MM * line_count as f32;
    content.max(CARD_MIN_HEIGHT_MM)
}
