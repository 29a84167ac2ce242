//! OpenAI Chat Completions 連携（構造化出力）
//!
//! response_format に json_schema（strict）を指定し、応答本文を AuditReport として読む。

use super::{ExtractionRequest, ExtractionService};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use async_trait::async_trait;
use logbook_audit_common::{audit_schema, parse_audit_response, AuditReport, SCHEMA_NAME};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chat Completions リクエスト
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: &'static str,
    strict: bool,
    schema: serde_json::Value,
}

/// Chat Completions レスポンス
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

/// 抽出サービスのOpenAI実装
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(api_key: String, api_base: String, model: String, max_tokens: u32, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ServiceError::Network(format!("HTTPクライアント初期化失敗: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
            max_tokens,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.get_api_key()?,
            config.api_base(),
            config.model.clone(),
            config.max_tokens,
            config.timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

/// リクエスト本文を組み立てる
///
/// system → user（テキスト1つ + 画像ごとに image_url）の順
fn build_body<'a>(model: &'a str, max_tokens: u32, request: &ExtractionRequest) -> ChatRequest<'a> {
    let mut parts = vec![ContentPart::Text {
        text: request.user.clone(),
    }];

    for image in &request.images {
        parts.push(ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: image.to_data_url(),
            },
        });
    }

    ChatRequest {
        model,
        messages: vec![
            Message {
                role: "system",
                content: MessageContent::Text(request.system.clone()),
            },
            Message {
                role: "user",
                content: MessageContent::Parts(parts),
            },
        ],
        max_tokens,
        response_format: ResponseFormat {
            kind: "json_schema",
            json_schema: JsonSchemaFormat {
                name: SCHEMA_NAME,
                strict: true,
                schema: audit_schema(),
            },
        },
    }
}

/// レスポンス本文から監査結果を取り出す
fn parse_body(body: &str) -> std::result::Result<AuditReport, ServiceError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::MalformedResponse(format!("レスポンスJSONが不正: {}", e)))?;

    let message = response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or_else(|| ServiceError::MalformedResponse("choices が空です".into()))?;

    if let Some(refusal) = message.refusal.filter(|r| !r.trim().is_empty()) {
        return Err(ServiceError::Refusal(refusal));
    }

    let content = message
        .content
        .ok_or_else(|| ServiceError::MalformedResponse("content がありません".into()))?;

    parse_audit_response(&content).map_err(|e| ServiceError::MalformedResponse(e.to_string()))
}

/// HTTPステータスと本文から結果を判定
///
/// 429 はレート制限、その他の非2xxはステータスエラー、2xxは本文をパースする。
fn classify_response(status: reqwest::StatusCode, body: String) -> std::result::Result<AuditReport, ServiceError> {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ServiceError::RateLimited(body));
    }
    if !status.is_success() {
        return Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        });
    }

    tracing::debug!(response_len = body.len(), "抽出レスポンス受信");
    parse_body(&body)
}

#[async_trait]
impl ExtractionService for OpenAiClient {
    async fn extract(&self, request: &ExtractionRequest) -> std::result::Result<AuditReport, ServiceError> {
        let body = build_body(&self.model, self.max_tokens, request);

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        classify_response(status, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::PageImage;
    use logbook_audit_common::build_instructions;

    fn request(prior: Option<&AuditReport>, count: usize) -> ExtractionRequest {
        let instructions = build_instructions(prior).unwrap();
        ExtractionRequest {
            system: instructions.system,
            user: instructions.user,
            prior: prior.cloned(),
            images: (0..count)
                .map(|i| PageImage {
                    name: format!("p{}.jpg", i),
                    data: vec![0xFF, 0xD8, i as u8],
                    subtype: "jpeg".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_body_layout() {
        let body = build_body("gpt-4o-2024-08-06", 4000, &request(None, 2));
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["model"], "gpt-4o-2024-08-06");
        assert_eq!(value["max_tokens"], 4000);
        assert_eq!(value["messages"][0]["role"], "system");
        assert!(value["messages"][0]["content"].is_string());

        let parts = value["messages"][1]["content"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[1]["type"], "image_url");
        assert!(parts[1]["image_url"]["url"]
            .as_str()
            .unwrap()
            .starts_with("data:image/jpeg;base64,"));

        assert_eq!(value["response_format"]["type"], "json_schema");
        assert_eq!(value["response_format"]["json_schema"]["name"], SCHEMA_NAME);
        assert_eq!(value["response_format"]["json_schema"]["strict"], true);
    }

    #[test]
    fn test_body_carries_prior_in_user_text() {
        let mut prior = AuditReport::default();
        prior.aircraft_info.registration_number = "N739XY".to_string();
        let body = build_body("m", 10, &request(Some(&prior), 1));
        let value = serde_json::to_value(&body).unwrap();

        let text = value["messages"][1]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("N739XY"));
    }

    /// content に監査結果JSONを入れたレスポンス本文
    fn chat_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content, "refusal": null}}]
        })
        .to_string()
    }

    fn report_json(make_model: &str) -> String {
        let mut report = AuditReport::default();
        report.aircraft_info.make_model = make_model.to_string();
        serde_json::to_string(&report).unwrap()
    }

    #[test]
    fn test_parse_body_success() {
        let report = parse_body(&chat_body(&report_json("Beechcraft A36"))).unwrap();
        assert_eq!(report.aircraft_info.make_model, "Beechcraft A36");
    }

    #[test]
    fn test_parse_body_rejects_schema_violation() {
        let result = parse_body(&chat_body(r#"{"unexpected":1}"#));
        assert!(matches!(result, Err(ServiceError::MalformedResponse(_))));

        let result = parse_body(&chat_body(r#"{"aircraft_info":{"make_model":"Beechcraft A36"}}"#));
        assert!(matches!(result, Err(ServiceError::MalformedResponse(_))));
    }

    #[test]
    fn test_classify_rate_limited() {
        let result = classify_response(reqwest::StatusCode::TOO_MANY_REQUESTS, "slow down".to_string());
        assert!(matches!(result, Err(ServiceError::RateLimited(body)) if body == "slow down"));
    }

    #[test]
    fn test_classify_error_status() {
        for code in [400u16, 401, 500, 503] {
            let status = reqwest::StatusCode::from_u16(code).unwrap();
            let result = classify_response(status, "boom".to_string());
            assert!(
                matches!(&result, Err(ServiceError::Status { status, body }) if *status == code && body == "boom"),
                "HTTP {} の判定が違う",
                code
            );
        }
    }

    #[test]
    fn test_classify_success_parses_body() {
        let result = classify_response(reqwest::StatusCode::OK, chat_body(&report_json("Piper PA-28")));
        assert_eq!(result.unwrap().aircraft_info.make_model, "Piper PA-28");

        let result = classify_response(reqwest::StatusCode::OK, "<html>".to_string());
        assert!(matches!(result, Err(ServiceError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // 127.0.0.1:9 は通常リッスンしていない
        let client = OpenAiClient::new(
            "sk-test".to_string(),
            "http://127.0.0.1:9/v1".to_string(),
            "m".to_string(),
            10,
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        let result = client.extract(&request(None, 1)).await;
        assert!(matches!(result, Err(ServiceError::Network(_))));
    }

    #[test]
    fn test_parse_body_refusal() {
        let body = r#"{"choices":[{"message":{"content":null,"refusal":"I can't help with that."}}]}"#;
        assert!(matches!(parse_body(body), Err(ServiceError::Refusal(_))));
    }

    #[test]
    fn test_parse_body_malformed() {
        assert!(matches!(parse_body("not json"), Err(ServiceError::MalformedResponse(_))));
        assert!(matches!(
            parse_body(r#"{"choices":[]}"#),
            Err(ServiceError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_body(r#"{"choices":[{"message":{"content":"no json at all"}}]}"#),
            Err(ServiceError::MalformedResponse(_))
        ));
    }
}
