//! APIレスポンスパーサー
//!
//! 抽出サービスの応答テキストからJSONオブジェクトを取り出し、
//! AuditReport にパースする

use crate::error::{Error, Result};
use crate::schema::{audit_schema, validate};
use crate::types::AuditReport;

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Arguments
/// * `response` - APIレスポンス文字列
///
/// # Returns
/// * `Ok(&str)` - 抽出されたJSON文字列
/// * `Err` - JSONが見つからない場合
///
/// # Examples
/// ```
/// use logbook_audit_common::extract_json;
///
/// let response = "Result: {\"key\": \"value\"}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"key\": \"value\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 抽出サービスの応答を監査結果としてパース
///
/// # Arguments
/// * `response` - 応答本文（構造化出力ならJSONそのもの）
///
/// # Returns
/// * `Ok(AuditReport)` - パース成功
/// * `Err` - JSONが見つからない、スキーマ違反（必須項目の欠落・未定義項目・型違い）、またはパース失敗
///
/// 保存済みファイルの読み込みとは違い、欠けた項目をデフォルト値で補わない。
pub fn parse_audit_response(response: &str) -> Result<AuditReport> {
    let json_str = extract_json(response)?;
    let value: serde_json::Value = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("監査結果 JSONパースエラー: {}", e)))?;
    validate(&value, &audit_schema()).map_err(|e| Error::Parse(format!("スキーマ違反: {}", e)))?;
    let report: AuditReport = serde_json::from_value(value)
        .map_err(|e| Error::Parse(format!("監査結果 JSONパースエラー: {}", e)))?;
    Ok(report)
}
