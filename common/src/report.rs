//! 監査結果の表示用テーブル
//!
//! AuditReport を8つのタブ（表）に変換する。表示側（CLI）はここで作った
//! 文字列をそのまま並べるだけにする。

use crate::error::{Error, Result};
use crate::types::AuditReport;

/// 任意項目が空のときの表示
pub const NOT_SPECIFIED: &str = "Not specified";
/// 改修内容が空のときの表示
pub const NONE_SPECIFIED: &str = "None specified";
/// サマリー項目が空のときの表示
pub const NONE_IDENTIFIED: &str = "None identified";

/// 結果タブ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditTab {
    AircraftInfo,
    LogbookCondition,
    Inspections,
    AirworthinessDirectives,
    TimeAndComponents,
    RepairsAndMods,
    RegulatoryDocs,
    Summary,
}

impl AuditTab {
    pub const ALL: [AuditTab; 8] = [
        AuditTab::AircraftInfo,
        AuditTab::LogbookCondition,
        AuditTab::Inspections,
        AuditTab::AirworthinessDirectives,
        AuditTab::TimeAndComponents,
        AuditTab::RepairsAndMods,
        AuditTab::RegulatoryDocs,
        AuditTab::Summary,
    ];

    /// タブ見出し
    pub fn label(&self) -> &'static str {
        match self {
            AuditTab::AircraftInfo => "🛩️ Aircraft Info",
            AuditTab::LogbookCondition => "📋 Logbook Condition",
            AuditTab::Inspections => "🔍 Inspections",
            AuditTab::AirworthinessDirectives => "⚠️ Airworthiness Directives",
            AuditTab::TimeAndComponents => "⏱️ Time & Components",
            AuditTab::RepairsAndMods => "🔧 Repairs & Mods",
            AuditTab::RegulatoryDocs => "📄 Regulatory Docs",
            AuditTab::Summary => "📝 Summary",
        }
    }

    /// タブ内のヘッダー
    pub fn heading(&self) -> &'static str {
        match self {
            AuditTab::AircraftInfo => "Aircraft Information",
            AuditTab::LogbookCondition => "Logbook Condition",
            AuditTab::Inspections => "Required Inspections",
            AuditTab::AirworthinessDirectives => "Airworthiness Directives",
            AuditTab::TimeAndComponents => "Time and Components",
            AuditTab::RepairsAndMods => "Repairs and Modifications",
            AuditTab::RegulatoryDocs => "Regulatory Documents",
            AuditTab::Summary => "Audit Summary",
        }
    }
}

impl std::str::FromStr for AuditTab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "aircraft" | "aircraftinfo" => Ok(AuditTab::AircraftInfo),
            "condition" | "logbookcondition" => Ok(AuditTab::LogbookCondition),
            "inspections" => Ok(AuditTab::Inspections),
            "ads" | "airworthinessdirectives" => Ok(AuditTab::AirworthinessDirectives),
            "components" | "timeandcomponents" => Ok(AuditTab::TimeAndComponents),
            "repairs" | "repairsandmods" => Ok(AuditTab::RepairsAndMods),
            "docs" | "regulatorydocs" => Ok(AuditTab::RegulatoryDocs),
            "summary" => Ok(AuditTab::Summary),
            _ => Err(Error::Parse(format!(
                "Unknown tab: {}. Use aircraft, condition, inspections, ads, components, repairs, docs, or summary",
                s
            ))),
        }
    }
}

/// 表（ヘッダー + 行）
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// タブの中身
#[derive(Debug, Clone, PartialEq)]
pub enum TabContent {
    Table(Table),
    /// リストが空のときの案内文
    Empty(&'static str),
    /// 見出し付きの自由記述（サマリー）
    Sections(Vec<(&'static str, String)>),
}

/// 通常の真偽値: true が肯定
pub fn yes_no(value: bool) -> String {
    if value { "✅ Yes" } else { "❌ No" }.to_string()
}

/// 記載欠落: true は警告、false が肯定（他の真偽値と極性が逆）
pub fn gap_flag(value: bool) -> String {
    if value { "⚠️ Yes" } else { "✅ No" }.to_string()
}

/// 書類の有無
pub fn present_missing(value: bool) -> String {
    if value { "✅ Present" } else { "❌ Missing" }.to_string()
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

/// 時間値の表示（整数でも小数点以下1桁を残す）
fn format_hours(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn field_table(first: &'static str, second: &'static str, pairs: Vec<(&str, String)>) -> TabContent {
    TabContent::Table(Table {
        headers: vec![first, second],
        rows: pairs
            .into_iter()
            .map(|(label, value)| vec![label.to_string(), value])
            .collect(),
    })
}

/// 指定タブの表示内容を作る
pub fn render_tab(report: &AuditReport, tab: AuditTab) -> TabContent {
    match tab {
        AuditTab::AircraftInfo => {
            let info = &report.aircraft_info;
            field_table(
                "Field",
                "Value",
                vec![
                    ("Make/Model", info.make_model.clone()),
                    ("Registration", info.registration_number.clone()),
                    ("Serial Number", info.serial_number.clone()),
                    ("Hobbs Time", format_hours(info.hobbs_time)),
                    ("Tach Time", format_hours(info.tach_time)),
                    ("TTAF", format_hours(info.ttaf)),
                    ("Engine TSMOH", or_placeholder(info.engine_tsmoh.as_deref(), NOT_SPECIFIED)),
                    ("Propeller TSPOH", or_placeholder(info.propeller_tspoh.as_deref(), NOT_SPECIFIED)),
                    ("Date of Audit", or_placeholder(info.date_of_audit.as_deref(), NOT_SPECIFIED)),
                    ("Auditor", info.auditor_name.clone()),
                ],
            )
        }
        AuditTab::LogbookCondition => {
            let c = &report.logbook_condition;
            field_table(
                "Condition",
                "Status",
                vec![
                    ("All Original Logs Present", yes_no(c.all_original_logs_present)),
                    ("Chronologically Organized", yes_no(c.chronologically_organized)),
                    ("Legible Handwriting", yes_no(c.legible_handwriting)),
                    ("Gaps in Entries", gap_flag(c.gaps_in_entries)),
                    ("Digital Copies Exist", yes_no(c.scanned_digital_copies_exist)),
                ],
            )
        }
        AuditTab::Inspections => {
            let items = &report.required_inspections.inspections;
            if items.is_empty() {
                return TabContent::Empty("No inspection information found in the images.");
            }
            TabContent::Table(Table {
                headers: vec!["Inspection Type", "Last Completed", "Next Due", "Completed", "Notes"],
                rows: items
                    .iter()
                    .map(|i| {
                        vec![
                            i.inspection_type.clone(),
                            or_placeholder(i.last_completed.as_deref(), NOT_SPECIFIED),
                            or_placeholder(i.next_due.as_deref(), NOT_SPECIFIED),
                            yes_no(i.completed),
                            i.notes.clone(),
                        ]
                    })
                    .collect(),
            })
        }
        AuditTab::AirworthinessDirectives => {
            let ads = &report.airworthiness_directives.ads;
            if ads.is_empty() {
                return TabContent::Empty("No airworthiness directive information found in the images.");
            }
            TabContent::Table(Table {
                headers: vec![
                    "AD Number",
                    "Description",
                    "Complied Date",
                    "Method",
                    "Recurring",
                    "Next Due",
                    "Notes",
                ],
                rows: ads
                    .iter()
                    .map(|ad| {
                        vec![
                            ad.ad_number.clone(),
                            ad.description.clone(),
                            or_placeholder(ad.complied_date.as_deref(), NOT_SPECIFIED),
                            or_placeholder(ad.method_of_compliance.as_deref(), NOT_SPECIFIED),
                            yes_no(ad.recurring),
                            or_placeholder(ad.next_due.as_deref(), NOT_SPECIFIED),
                            ad.notes.clone(),
                        ]
                    })
                    .collect(),
            })
        }
        AuditTab::TimeAndComponents => {
            let components = &report.time_and_components.components;
            if components.is_empty() {
                return TabContent::Empty("No component time information found in the images.");
            }
            TabContent::Table(Table {
                headers: vec!["Component", "Time Since Overhaul", "Next Due", "Notes"],
                rows: components
                    .iter()
                    .map(|c| {
                        vec![
                            c.component.clone(),
                            c.time_since_overhaul.clone(),
                            c.next_due.clone(),
                            c.notes.clone(),
                        ]
                    })
                    .collect(),
            })
        }
        AuditTab::RepairsAndMods => {
            let r = &report.repairs_and_mods;
            field_table(
                "Item",
                "Status/Details",
                vec![
                    ("STCs Logged", yes_no(r.stcs_logged)),
                    ("Form 337s", yes_no(r.form_337s)),
                    ("Field Approvals", yes_no(r.field_approvals)),
                    ("Updated Weight & Balance", yes_no(r.updated_weight_balance)),
                    ("Avionics Upgrades", or_placeholder(Some(r.avionics_upgrades.as_str()), NONE_SPECIFIED)),
                ],
            )
        }
        AuditTab::RegulatoryDocs => {
            let d = &report.regulatory_docs;
            field_table(
                "Document",
                "Status",
                vec![
                    ("Airworthiness Certificate", present_missing(d.airworthiness_certificate)),
                    ("Registration Certificate", present_missing(d.registration_certificate)),
                    ("Current POH/AFM", present_missing(d.current_poh_afm)),
                    ("MEL Applicable", yes_no(d.mel_applicable)),
                    ("Maintenance Tracking Reports", present_missing(d.maintenance_tracking_reports)),
                ],
            )
        }
        AuditTab::Summary => {
            let s = &report.summary;
            TabContent::Sections(vec![
                ("Missing Items", or_placeholder(Some(s.missing_items.as_str()), NONE_IDENTIFIED)),
                (
                    "Outstanding Maintenance or ADs",
                    or_placeholder(Some(s.outstanding_maintenance_or_ads.as_str()), NONE_IDENTIFIED),
                ),
                ("Logbook Gaps", or_placeholder(Some(s.logbook_gaps.as_str()), NONE_IDENTIFIED)),
                (
                    "General Observations",
                    or_placeholder(Some(s.general_observations.as_str()), "No additional observations"),
                ),
                (
                    "Recommendations",
                    or_placeholder(Some(s.recommendations.as_str()), "No specific recommendations"),
                ),
            ])
        }
    }
}
