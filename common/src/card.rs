//! 資格証カードのセクション定義とレイアウト計算
//!
//! PNG/PDF出力はここで計算した CardLayout をそのまま描画する。
//! 値が空の項目は "Not specified" を表示する。

use crate::error::{Error, Result};
use crate::layout::{card_height_mm, CARD_WIDTH_MM, LINE_HEIGHT_MM, MARGIN_MM, TITLE_HEIGHT_MM};
use crate::report::NOT_SPECIFIED;
use std::collections::BTreeMap;

/// 入力項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// 生成器テーブルや `--set` で使うキー
    pub id: &'static str,
    /// カードに表示するラベル
    pub label: &'static str,
}

/// カードのセクション（1セクション = 1ファイル）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

pub const SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        id: "personal",
        title: "Personal Information",
        fields: &[
            FieldSpec { id: "full_name", label: "Full Name" },
            FieldSpec { id: "date_of_birth", label: "Date of Birth" },
            FieldSpec { id: "gender", label: "Gender" },
            FieldSpec { id: "nationality", label: "Nationality" },
            FieldSpec { id: "notes", label: "Notes" },
        ],
    },
    SectionSpec {
        id: "contact",
        title: "Contact Details",
        fields: &[
            FieldSpec { id: "email", label: "Email" },
            FieldSpec { id: "phone", label: "Phone" },
            FieldSpec { id: "address", label: "Address" },
            FieldSpec { id: "city", label: "City" },
            FieldSpec { id: "country", label: "Country" },
        ],
    },
    SectionSpec {
        id: "credential",
        title: "Professional Credentials",
        fields: &[
            FieldSpec { id: "organization", label: "Organization" },
            FieldSpec { id: "job_title", label: "Job Title" },
            FieldSpec { id: "employee_id", label: "Employee ID" },
            FieldSpec { id: "license_number", label: "License Number" },
            FieldSpec { id: "issue_date", label: "Issue Date" },
            FieldSpec { id: "expiry_date", label: "Expiry Date" },
        ],
    },
];

/// セクションIDから定義を取得
pub fn find_section(id: &str) -> Result<&'static SectionSpec> {
    SECTIONS
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| Error::UnknownSection(id.to_string()))
}

/// 全セクションから項目定義を取得
pub fn find_field(id: &str) -> Option<&'static FieldSpec> {
    SECTIONS.iter().flat_map(|s| s.fields.iter()).find(|f| f.id == id)
}

/// カード1行分（上端からのmm座標）
#[derive(Debug, Clone, PartialEq)]
pub struct CardLine {
    pub label: String,
    pub value: String,
    pub y_mm: f32,
}

impl CardLine {
    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// 描画前のカードレイアウト
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub title: String,
    pub title_y_mm: f32,
    pub x_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
    pub lines: Vec<CardLine>,
}

/// タイトルとラベル/値の組を縦に並べる
///
/// # Arguments
/// * `title` - カードタイトル
/// * `entries` - 表示順のラベルと値（空の値は "Not specified"）
pub fn layout_card(title: &str, entries: &[(String, String)]) -> CardLayout {
    let first_line_y = MARGIN_MM + TITLE_HEIGHT_MM;

    let lines = entries
        .iter()
        .enumerate()
        .map(|(i, (label, value))| CardLine {
            label: label.clone(),
            value: if value.trim().is_empty() {
                NOT_SPECIFIED.to_string()
            } else {
                value.clone()
            },
            y_mm: first_line_y + LINE_HEIGHT_MM * (i as f32 + 1.0),
        })
        .collect::<Vec<_>>();

    CardLayout {
        title: title.to_string(),
        title_y_mm: MARGIN_MM + TITLE_HEIGHT_MM * 0.75,
        x_mm: MARGIN_MM,
        width_mm: CARD_WIDTH_MM,
        height_mm: card_height_mm(lines.len()),
        lines,
    }
}

/// セクションIDとラベル→値のマップからレイアウトを作る
///
/// セクションに定義されたラベルだけを定義順に並べる。マップにない項目は空扱い。
pub fn layout_section(section_id: &str, values: &BTreeMap<String, String>) -> Result<CardLayout> {
    let section = find_section(section_id)?;
    let entries: Vec<(String, String)> = section
        .fields
        .iter()
        .map(|f| {
            let value = values.get(f.label).cloned().unwrap_or_default();
            (f.label.to_string(), value)
        })
        .collect();
    Ok(layout_card(section.title, &entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_without_value_shows_placeholder() {
        let mut values = BTreeMap::new();
        values.insert("Full Name".to_string(), "Jane Doe".to_string());

        let layout = layout_section("personal", &values).unwrap();
        let notes = layout.lines.iter().find(|l| l.label == "Notes").unwrap();
        assert_eq!(notes.value, "Not specified");
        assert_eq!(notes.text(), "Notes: Not specified");
        assert_eq!(layout.lines[0].text(), "Full Name: Jane Doe");
    }

    #[test]
    fn test_blank_value_shows_placeholder() {
        let layout = layout_card("T", &[("Notes".to_string(), "   ".to_string())]);
        assert_eq!(layout.lines[0].value, NOT_SPECIFIED);
    }

    #[test]
    fn test_lines_stack_vertically() {
        let layout = layout_section("credential", &BTreeMap::new()).unwrap();
        assert_eq!(layout.title, "Professional Credentials");
        assert_eq!(layout.lines.len(), 6);
        assert!(layout.title_y_mm < layout.lines[0].y_mm);
        for pair in layout.lines.windows(2) {
            assert!((pair[1].y_mm - pair[0].y_mm - LINE_HEIGHT_MM).abs() < 0.001);
        }
        assert!(layout.lines.last().unwrap().y_mm < layout.height_mm);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let mut values = BTreeMap::new();
        values.insert("Email".to_string(), "a@example.com".to_string());
        let first = layout_section("contact", &values).unwrap();
        let second = layout_section("contact", &values).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_section() {
        let result = layout_section("vehicle", &BTreeMap::new());
        assert!(matches!(result, Err(Error::UnknownSection(_))));
    }

    #[test]
    fn test_field_ids_unique() {
        let mut ids: Vec<&str> = SECTIONS.iter().flat_map(|s| s.fields.iter().map(|f| f.id)).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(find_field("notes").unwrap().label, "Notes");
        assert!(find_field("unknown").is_none());
    }
}
