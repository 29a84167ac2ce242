//! logbook-audit
//!
//! 航空機ログブックの画像/PDFをバッチで構造化抽出するCLIと、資格証カード生成。

pub mod cli;
pub mod config;
pub mod credential;
pub mod display;
pub mod error;
pub mod export;
pub mod extractor;
pub mod loader;
pub mod session;
