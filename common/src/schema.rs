//! 構造化出力スキーマ
//!
//! 抽出サービスに渡すJSON Schema。strictモードでは全プロパティを required にし、
//! 追加プロパティを禁止する必要がある。任意項目は null 許可で表現する。

use serde_json::{json, Map, Value};

/// スキーマ名（レスポンスフォーマットの name）
pub const SCHEMA_NAME: &str = "aviation_logbook_audit";

fn string() -> Value {
    json!({ "type": "string" })
}

fn nullable_string() -> Value {
    json!({ "type": ["string", "null"] })
}

fn number() -> Value {
    json!({ "type": "number" })
}

fn boolean() -> Value {
    json!({ "type": "boolean" })
}

/// strictモード用のオブジェクト定義（全プロパティ必須）
fn object(properties: &[(&str, Value)]) -> Value {
    let mut props = Map::new();
    for (name, schema) in properties {
        props.insert((*name).to_string(), schema.clone());
    }
    let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();

    json!({
        "type": "object",
        "properties": props,
        "required": required,
        "additionalProperties": false,
    })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "array", "items": items })
}

/// AuditReport のJSON Schema
pub fn audit_schema() -> Value {
    let aircraft_info = object(&[
        ("make_model", string()),
        ("registration_number", string()),
        ("serial_number", string()),
        ("hobbs_time", number()),
        ("tach_time", number()),
        ("ttaf", number()),
        ("engine_TSMOH", nullable_string()),
        ("propeller_TSPOH", nullable_string()),
        ("date_of_audit", nullable_string()),
        ("auditor_name", string()),
    ]);

    let logbook_condition = object(&[
        ("all_original_logs_present", boolean()),
        ("chronologically_organized", boolean()),
        ("legible_handwriting", boolean()),
        ("gaps_in_entries", boolean()),
        ("scanned_digital_copies_exist", boolean()),
    ]);

    let inspection = object(&[
        ("inspection_type", string()),
        ("last_completed", nullable_string()),
        ("next_due", nullable_string()),
        ("completed", boolean()),
        ("notes", string()),
    ]);

    let ad = object(&[
        ("ad_number", string()),
        ("description", string()),
        ("complied_date", nullable_string()),
        ("method_of_compliance", nullable_string()),
        ("recurring", boolean()),
        ("next_due", nullable_string()),
        ("notes", string()),
    ]);

    let component = object(&[
        ("component", string()),
        ("time_since_overhaul", string()),
        ("next_due", string()),
        ("notes", string()),
    ]);

    let repairs_and_mods = object(&[
        ("STCs_logged", boolean()),
        ("form_337s", boolean()),
        ("field_approvals", boolean()),
        ("updated_weight_balance", boolean()),
        ("avionics_upgrades", string()),
    ]);

    let regulatory_docs = object(&[
        ("airworthiness_certificate", boolean()),
        ("registration_certificate", boolean()),
        ("current_POH_AFM", boolean()),
        ("MEL_applicable", boolean()),
        ("maintenance_tracking_reports", boolean()),
    ]);

    let summary = object(&[
        ("missing_items", string()),
        ("outstanding_maintenance_or_ADs", string()),
        ("logbook_gaps", string()),
        ("general_observations", string()),
        ("recommendations", string()),
    ]);

    object(&[
        ("aircraft_info", aircraft_info),
        ("logbook_condition", logbook_condition),
        ("required_inspections", object(&[("inspections", array_of(inspection))])),
        ("airworthiness_directives", object(&[("ads", array_of(ad))])),
        ("time_and_components", object(&[("components", array_of(component))])),
        ("repairs_and_mods", repairs_and_mods),
        ("regulatory_docs", regulatory_docs),
        ("summary", summary),
    ])
}

fn type_matches(value: &Value, expected: &str) -> bool {
    match expected {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn check(value: &Value, schema: &Value, path: &str) -> std::result::Result<(), String> {
    let type_ok = match &schema["type"] {
        Value::String(t) => type_matches(value, t),
        Value::Array(types) => types.iter().filter_map(Value::as_str).any(|t| type_matches(value, t)),
        _ => true,
    };
    if !type_ok {
        return Err(format!("{}: 型が {} ではありません", path, schema["type"]));
    }

    if let (Some(fields), Some(props)) = (value.as_object(), schema["properties"].as_object()) {
        if let Some(required) = schema["required"].as_array() {
            for name in required.iter().filter_map(Value::as_str) {
                if !fields.contains_key(name) {
                    return Err(format!("{}.{} がありません", path, name));
                }
            }
        }
        for (name, child) in fields {
            match props.get(name) {
                Some(child_schema) => check(child, child_schema, &format!("{}.{}", path, name))?,
                None if schema["additionalProperties"] == false => {
                    return Err(format!("{}.{} は未定義の項目です", path, name));
                }
                None => {}
            }
        }
    }

    if let Some(items) = value.as_array() {
        for (i, item) in items.iter().enumerate() {
            check(item, &schema["items"], &format!("{}[{}]", path, i))?;
        }
    }

    Ok(())
}

/// 値がスキーマを満たすか検証（必須項目・未定義項目・型）
///
/// エラーは最初に見つかった違反の位置（`$.aircraft_info.ttaf` 形式）を含む。
pub fn validate(value: &Value, schema: &Value) -> std::result::Result<(), String> {
    check(value, schema, "$")
}
