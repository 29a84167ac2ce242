//! プロンプト生成モジュール
//!
//! バッチ抽出で使う指示文:
//! - 初回バッチ: ゼロから抽出し、見えない項目は空のままにする
//! - 2回目以降: 前回の監査結果を文脈として渡し、上書きではなくマージさせる

use crate::error::Result;
use crate::types::AuditReport;

/// 初回バッチのシステム指示
pub const INITIAL_SYSTEM_PROMPT: &str = "You are an expert aviation logbook auditor. \
Analyze the provided logbook images and extract information to fill out the aviation logbook audit template. \
DO NOT make up information - if you cannot find specific information in the images, leave those fields blank or use appropriate null values. \
It's perfectly acceptable to leave fields empty until the information is found in the images.";

/// 初回バッチのユーザー指示
pub const INITIAL_USER_PROMPT: &str = "Please analyze these aviation logbook images and extract all available information to complete the logbook audit. \
Only include information that you can clearly see in the images. \
If information is not visible or unclear, leave those fields blank. \
Focus on accuracy over completeness.";

/// 2回目以降のシステム指示
pub const FOLLOW_UP_SYSTEM_PROMPT: &str = "You are an expert aviation logbook auditor. \
You have already analyzed some logbook images and created a partial audit report. \
Now analyze these additional images and UPDATE the existing audit report with any new information found. \
DO NOT make up information - only add information you can clearly see in the new images. \
Keep existing information unless you find conflicting data that is more accurate.";

/// バッチ1回分の指示文
#[derive(Debug, Clone, PartialEq)]
pub struct Instructions {
    pub system: String,
    pub user: String,
}

/// 2回目以降のユーザー指示（前回結果のJSONを埋め込む）
pub fn build_follow_up_user_prompt(prior_json: &str) -> String {
    format!(
        "Here is the current audit report from previous images: {prior_json}. \
Now analyze these additional logbook images and update the audit report with any new information you can clearly see. \
Merge the information intelligently - add new inspections, components, ADs, etc. to the existing lists, \
and update fields that were previously empty if you now have the information."
    )
}

/// 前回結果の有無に応じて指示文を組み立てる
///
/// # Arguments
/// * `prior` - 前バッチまでの監査結果（初回は None）
///
/// # Returns
/// システム指示とユーザー指示の組
pub fn build_instructions(prior: Option<&AuditReport>) -> Result<Instructions> {
    match prior {
        None => Ok(Instructions {
            system: INITIAL_SYSTEM_PROMPT.to_string(),
            user: INITIAL_USER_PROMPT.to_string(),
        }),
        Some(report) => {
            let prior_json = serde_json::to_string(report)?;
            Ok(Instructions {
                system: FOLLOW_UP_SYSTEM_PROMPT.to_string(),
                user: build_follow_up_user_prompt(&prior_json),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_instructions() {
        let instructions = build_instructions(None).unwrap();
        assert_eq!(instructions.system, INITIAL_SYSTEM_PROMPT);
        assert!(instructions.system.contains("DO NOT make up information"));
        assert!(instructions.user.contains("leave those fields blank"));
        assert!(!instructions.user.contains("current audit report"));
    }

    #[test]
    fn test_follow_up_instructions_embed_prior() {
        let mut report = AuditReport::default();
        report.aircraft_info.registration_number = "N12345".to_string();

        let instructions = build_instructions(Some(&report)).unwrap();
        assert_eq!(instructions.system, FOLLOW_UP_SYSTEM_PROMPT);
        assert!(instructions.system.contains("UPDATE the existing audit report"));
        assert!(instructions.user.contains("\"registration_number\":\"N12345\""));
        assert!(instructions.user.contains("Merge the information intelligently"));
    }

    #[test]
    fn test_follow_up_prompt_is_valid_context() {
        // 埋め込まれたJSONが元のレポートに戻せること
        let mut report = AuditReport::default();
        report.summary.logbook_gaps = "2019-2020".to_string();
        let prior_json = serde_json::to_string(&report).unwrap();

        let prompt = build_follow_up_user_prompt(&prior_json);
        let start = prompt.find('{').unwrap();
        let end = prompt.rfind('}').unwrap();
        let restored: AuditReport = serde_json::from_str(&prompt[start..=end]).unwrap();
        assert_eq!(restored, report);
    }
}
