//! バッチ抽出モジュール
//!
//! 画像列を固定サイズのバッチに分け、1バッチ1リクエストで抽出サービスへ送る。
//! 2バッチ目以降は前バッチの結果を文脈として渡し、サービス側にマージさせる。
//! バッチは必ず入力順に1つずつ処理する（次の文脈が前の結果に依存するため）。

mod openai;

pub use openai::OpenAiClient;

use crate::error::{AuditError, Result, ServiceError};
use crate::loader::PageImage;
use crate::session::AuditSession;
use async_trait::async_trait;
use logbook_audit_common::{build_instructions, plan_batches, AuditReport};

/// 抽出サービスへの1リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    pub system: String,
    pub user: String,
    /// 前バッチまでの結果（文脈）
    pub prior: Option<AuditReport>,
    pub images: Vec<PageImage>,
}

/// 構造化抽出サービス
#[async_trait]
pub trait ExtractionService: Send + Sync {
    async fn extract(&self, request: &ExtractionRequest) -> std::result::Result<AuditReport, ServiceError>;
}

/// バッチ1つ分のリクエストを組み立てる
pub fn build_request(images: &[PageImage], prior: Option<&AuditReport>) -> Result<ExtractionRequest> {
    if images.is_empty() {
        return Err(AuditError::EmptyBatch);
    }

    let instructions = build_instructions(prior)?;

    Ok(ExtractionRequest {
        system: instructions.system,
        user: instructions.user,
        prior: prior.cloned(),
        images: images.to_vec(),
    })
}

/// バッチ1つを抽出
///
/// サービスのエラーはそのまま返す（再試行なし）。
pub async fn extract<S>(service: &S, images: &[PageImage], prior: Option<&AuditReport>) -> Result<AuditReport>
where
    S: ExtractionService + ?Sized,
{
    let request = build_request(images, prior)?;
    tracing::debug!(
        images = request.images.len(),
        has_prior = request.prior.is_some(),
        user_prompt_len = request.user.len(),
        "抽出リクエスト送信"
    );
    let report = service.extract(&request).await?;
    Ok(report)
}

/// バッチ進捗の通知先
pub trait BatchObserver {
    /// バッチ開始（1始まりの番号, 総数, 枚数）
    fn batch_started(&self, _number: usize, _total: usize, _size: usize) {}
    /// バッチ完了
    fn batch_finished(&self, _number: usize, _total: usize) {}
}

/// 通知不要なとき用
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// 全バッチを順番に処理するループ
///
/// セッションを初期化してから開始し、各バッチの結果でセッションの結果を置き換える。
/// 途中で失敗した場合はエラーを返し、セッションには最後に成功したバッチの結果が残る。
pub async fn run_extraction<S, O>(
    service: &S,
    images: &[PageImage],
    batch_size: usize,
    session: &mut AuditSession,
    observer: &O,
) -> Result<AuditReport>
where
    S: ExtractionService + ?Sized,
    O: BatchObserver + ?Sized,
{
    if images.is_empty() {
        return Err(AuditError::EmptyBatch);
    }

    let plan = plan_batches(images.len(), batch_size)?;
    let total = plan.len();

    session.reset();
    session.begin(total);

    for batch in &plan {
        let number = batch.index + 1;
        observer.batch_started(number, total, batch.len());
        tracing::info!(batch = number, total, size = batch.len(), "バッチ処理開始");

        let report = extract(service, &images[batch.range()], session.result()).await?;
        session.record_batch(report, batch.end);

        observer.batch_finished(number, total);
    }

    session
        .result()
        .cloned()
        .ok_or(AuditError::EmptyBatch)
}
