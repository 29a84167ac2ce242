use thiserror::Error;

/// 抽出サービス呼び出しの失敗
///
/// 再試行やフォールバックは行わず、そのまま呼び出し元へ伝播する。
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("通信エラー: {0}")]
    Network(String),

    #[error("レート制限に達しました: {0}")]
    RateLimited(String),

    #[error("APIエラー (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    #[error("抽出サービスが応答を拒否しました: {0}")]
    Refusal(String),

    #[error("スキーマに合わない応答: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`logbook-audit config --set-api-key YOUR_KEY` で設定するか OPENAI_API_KEY を指定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していないファイル形式です（jpg/jpeg/png/pdf のみ）: {0}")]
    UnsupportedFile(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("PDFラスタライズエラー: {0}")]
    PdfRender(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("空のバッチは抽出できません")]
    EmptyBatch,

    #[error("抽出サービスエラー: {0}")]
    Service(#[from] ServiceError),

    #[error("項目の指定が不正です（key=value 形式）: {0}")]
    InvalidFieldAssignment(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("PNG生成エラー: {0}")]
    PngGeneration(String),

    #[error("PDF生成エラー: {0}")]
    PdfGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] logbook_audit_common::Error),
}

pub type Result<T> = std::result::Result<T, AuditError>;
