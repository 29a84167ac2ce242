//! 監査セッション
//!
//! 1回の対話実行のあいだだけ保持する状態。抽出ループが所有し、
//! 各バッチの結果で累積結果を置き換える。

use logbook_audit_common::AuditReport;

/// 進行状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// まだバッチを処理していない
    Idle,
    /// total バッチ中 done バッチ処理済み
    InProgress { done: usize, total: usize },
    /// 全バッチ処理済み
    Complete { total: usize },
}

#[derive(Debug, Clone, Default)]
pub struct AuditSession {
    result: Option<AuditReport>,
    processed_images: usize,
    completed_batches: usize,
    total_batches: usize,
}

impl AuditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累積結果と進捗を破棄
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn begin(&mut self, total_batches: usize) {
        self.total_batches = total_batches;
    }

    /// バッチ完了を記録（結果は前回を置き換える）
    pub(crate) fn record_batch(&mut self, report: AuditReport, processed_images: usize) {
        self.result = Some(report);
        self.processed_images = processed_images;
        self.completed_batches += 1;
    }

    pub fn result(&self) -> Option<&AuditReport> {
        self.result.as_ref()
    }

    pub fn processed_images(&self) -> usize {
        self.processed_images
    }

    pub fn completed_batches(&self) -> usize {
        self.completed_batches
    }

    pub fn total_batches(&self) -> usize {
        self.total_batches
    }

    pub fn status(&self) -> SessionStatus {
        if self.total_batches == 0 {
            SessionStatus::Idle
        } else if self.completed_batches >= self.total_batches {
            SessionStatus::Complete { total: self.total_batches }
        } else {
            SessionStatus::InProgress {
                done: self.completed_batches,
                total: self.total_batches,
            }
        }
    }
}
