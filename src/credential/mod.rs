//! 資格証カードの入力フォーム
//!
//! 項目ID → 値 を保持するセッション状態。ユーザー入力が優先され、
//! 未入力の項目だけランダム値で埋める。

mod generators;

pub use generators::{default_generator, generator_table, FieldGenerator, DEFAULT_GENERATOR};

use crate::error::{AuditError, Result};
use dialoguer::Input;
use logbook_audit_common::card::{find_field, find_section, SectionSpec};
use logbook_audit_common::SECTIONS;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap};

/// `key=value` 形式の指定を分解
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| AuditError::InvalidFieldAssignment(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(AuditError::InvalidFieldAssignment(raw.to_string()));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

pub struct CredentialForm {
    values: HashMap<String, String>,
    generators: HashMap<&'static str, FieldGenerator>,
    rng: StdRng,
}

impl CredentialForm {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            values: HashMap::new(),
            generators: generator_table(),
            rng,
        }
    }

    /// ユーザー入力を設定（空文字は未入力として扱う）
    pub fn set(&mut self, field_id: &str, value: &str) {
        if value.trim().is_empty() {
            self.values.remove(field_id);
        } else {
            self.values.insert(field_id.to_string(), value.to_string());
        }
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.values.get(field_id).map(String::as_str)
    }

    /// 1項目をランダム値で作り直す
    pub fn regenerate(&mut self, field_id: &str) -> &str {
        let generator = self
            .generators
            .get(field_id)
            .copied()
            .unwrap_or(DEFAULT_GENERATOR);
        let value = generator(&mut self.rng);
        tracing::debug!(field = field_id, "ランダム値を生成");
        self.values.insert(field_id.to_string(), value);
        self.values.get(field_id).map(String::as_str).unwrap_or_default()
    }

    /// 未入力の項目をすべてランダム値で埋める
    pub fn fill_missing(&mut self, section: &SectionSpec) {
        for field in section.fields {
            if !self.values.contains_key(field.id) {
                self.regenerate(field.id);
            }
        }
    }

    /// セクションのラベル → 値（未入力は空文字）
    pub fn section_values(&self, section: &SectionSpec) -> BTreeMap<String, String> {
        section
            .fields
            .iter()
            .map(|f| (f.label.to_string(), self.get(f.id).unwrap_or_default().to_string()))
            .collect()
    }

    /// 全セクションを通して未知の項目IDを検出
    pub fn unknown_fields(&self) -> Vec<&str> {
        let mut unknown: Vec<&str> = self
            .values
            .keys()
            .filter(|id| find_field(id).is_none())
            .map(String::as_str)
            .collect();
        unknown.sort();
        unknown
    }
}

/// 未入力の項目を対話的に入力（空Enterで未入力のまま）
pub fn prompt_section(form: &mut CredentialForm, section: &SectionSpec) -> Result<()> {
    println!("\n[{}]", section.title);
    for field in section.fields {
        if form.get(field.id).is_some() {
            continue;
        }
        let value: String = Input::new()
            .with_prompt(field.label)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AuditError::Prompt(e.to_string()))?;
        form.set(field.id, value.trim());
    }
    Ok(())
}

/// セクション指定（"all" で全セクション）を定義の列に変換
pub fn resolve_sections(id: &str) -> Result<Vec<&'static SectionSpec>> {
    if id == "all" {
        return Ok(SECTIONS.iter().collect());
    }
    Ok(vec![find_section(id)?])
}
