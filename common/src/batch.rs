//! バッチ分割
//!
//! 平坦な画像リストを固定サイズの連続スライスに分割する。
//! 最後のバッチだけが小さくなりうる。

use crate::error::{Error, Result};
use std::ops::Range;

/// 1リクエストあたりの画像枚数
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// 1バッチ分の範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRange {
    /// 0始まりのバッチ番号
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl BatchRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// バッチ数（切り上げ）
pub fn batch_count(total: usize, batch_size: usize) -> Result<usize> {
    if batch_size == 0 {
        return Err(Error::InvalidBatchSize(batch_size));
    }
    Ok(total.div_ceil(batch_size))
}

/// 画像枚数とバッチサイズからバッチ範囲の列を作る
pub fn plan_batches(total: usize, batch_size: usize) -> Result<Vec<BatchRange>> {
    let count = batch_count(total, batch_size)?;

    Ok((0..count)
        .map(|index| {
            let start = index * batch_size;
            let end = (start + batch_size).min(total);
            BatchRange { index, start, end }
        })
        .collect())
}
