//! 資格証カード出力テスト

use logbook_audit::credential::CredentialForm;
use logbook_audit::export::{export_section, png, CardFonts, ExportFormat};
use logbook_audit_common::card::find_section;
use logbook_audit_common::layout::mm_to_px;
use logbook_audit_common::layout_section;
use std::collections::BTreeMap;
use tempfile::tempdir;

fn personal_values() -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    values.insert("Full Name".to_string(), "Jane Doe".to_string());
    values.insert("Date of Birth".to_string(), "1984-03-12".to_string());
    values
}

/// 同じ入力から2回生成すると同じ寸法・同じバイト列
#[test]
fn test_png_generation_is_idempotent() {
    let font = png::find_font(None);

    let first = layout_section("personal", &personal_values()).unwrap();
    let second = layout_section("personal", &personal_values()).unwrap();
    assert_eq!(first, second);

    let a = png::render_png(&first, font.as_ref()).unwrap();
    let b = png::render_png(&second, font.as_ref()).unwrap();
    assert_eq!(a, b);

    let decoded = image::load_from_memory(&a).unwrap();
    assert_eq!(decoded.width(), mm_to_px(first.width_mm));
    assert_eq!(decoded.height(), mm_to_px(first.height_mm));
}

/// 未入力の Notes は "Not specified"
#[test]
fn test_missing_notes_render_placeholder() {
    let layout = layout_section("personal", &personal_values()).unwrap();
    let notes = layout.lines.iter().find(|l| l.label == "Notes").unwrap();
    assert_eq!(notes.text(), "Notes: Not specified");
}

/// PNG/PDF両方を `<section>.png` / `<section>.pdf` に書き出す
#[test]
fn test_export_both_formats() {
    let dir = tempdir().expect("Failed to create temp dir");
    let fonts = CardFonts::discover(None);
    let layout = layout_section("contact", &BTreeMap::new()).unwrap();

    let written = export_section(&layout, "contact", ExportFormat::Both, dir.path(), &fonts).unwrap();
    assert_eq!(written, vec![dir.path().join("contact.png"), dir.path().join("contact.pdf")]);

    let pdf = std::fs::read(dir.path().join("contact.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    let png_bytes = std::fs::read(dir.path().join("contact.png")).unwrap();
    assert!(image::load_from_memory(&png_bytes).is_ok());
}

/// 出力先ディレクトリがなければ作る
#[test]
fn test_export_creates_output_dir() {
    let dir = tempdir().expect("Failed to create temp dir");
    let nested = dir.path().join("cards").join("out");
    let layout = layout_section("credential", &BTreeMap::new()).unwrap();

    let written = export_section(&layout, "credential", ExportFormat::Pdf, &nested, &CardFonts::discover(None)).unwrap();
    assert_eq!(written.len(), 1);
    assert!(nested.join("credential.pdf").exists());
}

/// シード付きランダム入力は同じカードになる
#[test]
fn test_seeded_random_cards_match() {
    let section = find_section("credential").unwrap();
    let font = png::find_font(None);

    let render = || {
        let mut form = CredentialForm::new(Some(2024));
        form.set("organization", "Summit Aviation");
        form.fill_missing(section);
        let layout = layout_section(section.id, &form.section_values(section)).unwrap();
        png::render_png(&layout, font.as_ref()).unwrap()
    };

    assert_eq!(render(), render());
}
