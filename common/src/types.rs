//! 監査結果の型定義
//!
//! 抽出サービスが返す構造化レコード（AuditReport）。
//! フィールド名はサービス側スキーマと一致させる（大文字略語を含む）。
//! すべてのフィールドにデフォルト値を持たせ、部分的な応答も読めるようにしている。

use serde::{Deserialize, Serialize};

/// 機体情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftInfo {
    pub make_model: String,
    pub registration_number: String,
    pub serial_number: String,
    pub hobbs_time: f64,
    pub tach_time: f64,
    pub ttaf: f64,
    #[serde(rename = "engine_TSMOH")]
    pub engine_tsmoh: Option<String>,
    #[serde(rename = "propeller_TSPOH")]
    pub propeller_tspoh: Option<String>,
    pub date_of_audit: Option<String>,
    pub auditor_name: String,
}

/// ログブックの状態
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogbookCondition {
    pub all_original_logs_present: bool,
    pub chronologically_organized: bool,
    pub legible_handwriting: bool,
    /// 記載の欠落あり（true は望ましくない）
    pub gaps_in_entries: bool,
    pub scanned_digital_copies_exist: bool,
}

/// 点検記録
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionEntry {
    pub inspection_type: String,
    pub last_completed: Option<String>,
    pub next_due: Option<String>,
    pub completed: bool,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequiredInspections {
    pub inspections: Vec<InspectionEntry>,
}

/// 耐空性改善通報（AD）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdEntry {
    pub ad_number: String,
    pub description: String,
    pub complied_date: Option<String>,
    pub method_of_compliance: Option<String>,
    pub recurring: bool,
    pub next_due: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirworthinessDirectives {
    pub ads: Vec<AdEntry>,
}

/// 部品の使用時間
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentEntry {
    pub component: String,
    pub time_since_overhaul: String,
    pub next_due: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeAndComponents {
    pub components: Vec<ComponentEntry>,
}

/// 修理・改造
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairsAndMods {
    #[serde(rename = "STCs_logged")]
    pub stcs_logged: bool,
    pub form_337s: bool,
    pub field_approvals: bool,
    pub updated_weight_balance: bool,
    pub avionics_upgrades: String,
}

/// 法定書類
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegulatoryDocs {
    pub airworthiness_certificate: bool,
    pub registration_certificate: bool,
    #[serde(rename = "current_POH_AFM")]
    pub current_poh_afm: bool,
    #[serde(rename = "MEL_applicable")]
    pub mel_applicable: bool,
    pub maintenance_tracking_reports: bool,
}

/// 監査サマリー
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub missing_items: String,
    #[serde(rename = "outstanding_maintenance_or_ADs")]
    pub outstanding_maintenance_or_ads: String,
    pub logbook_gaps: String,
    pub general_observations: String,
    pub recommendations: String,
}

/// ログブック監査結果（抽出サービスの出力）
///
/// 次のバッチでは前回の結果としてサービスへ送り返される。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditReport {
    pub aircraft_info: AircraftInfo,
    pub logbook_condition: LogbookCondition,
    pub required_inspections: RequiredInspections,
    pub airworthiness_directives: AirworthinessDirectives,
    pub time_and_components: TimeAndComponents,
    pub repairs_and_mods: RepairsAndMods,
    pub regulatory_docs: RegulatoryDocs,
    pub summary: Summary,
}
