use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use logbook_audit_common::AuditTab;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logbook-audit")]
#[command(about = "航空機ログブックAI監査・資格証カード生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ログブック画像/PDFを解析して監査レポートJSONを出力
    Audit {
        /// 画像/PDFファイルまたはフォルダ
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// 出力JSONファイル
        #[arg(short, long, default_value = "audit_result.json")]
        output: PathBuf,

        /// バッチサイズ（1リクエストあたりの画像数、省略時は設定値）
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// 進捗バーと結果タブを表示しない
        #[arg(short, long)]
        quiet: bool,
    },

    /// 保存済みの監査レポートを表示
    Show {
        /// 監査レポートJSON
        #[arg(required = true)]
        input: PathBuf,

        /// 表示するタブ (aircraft/condition/inspections/ads/components/repairs/docs/summary)
        #[arg(short, long)]
        tab: Option<AuditTab>,
    },

    /// 保存済みの監査レポートを破棄してやり直す
    Reset {
        /// 監査レポートJSON
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 資格証カードをPNG/PDFで生成
    Card {
        /// セクション (personal/contact/credential/all)
        #[arg(default_value = "all")]
        section: String,

        /// 出力形式 (png/pdf/both)
        #[arg(short, long, default_value = "png")]
        format: ExportFormat,

        /// 出力ディレクトリ
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// 項目の値を指定（key=value、複数可）
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// 指定した項目をランダム値で作り直す（項目ID、複数可）
        #[arg(long = "regen", value_name = "FIELD_ID")]
        regen: Vec<String>,

        /// 未入力の項目をランダム値で埋める
        #[arg(long)]
        random: bool,

        /// 乱数シード（同じシードで同じ値）
        #[arg(long)]
        seed: Option<u64>,

        /// 未入力の項目を対話的に入力
        #[arg(short, long)]
        interactive: bool,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// カード描画用TTFフォントを設定
        #[arg(long)]
        set_font: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_audit() {
        let cli = Cli::parse_from(["logbook-audit", "audit", "a.jpg", "logs/", "-b", "3", "-r"]);
        match cli.command {
            Commands::Audit { inputs, batch_size, recursive, output, quiet } => {
                assert_eq!(inputs.len(), 2);
                assert_eq!(batch_size, Some(3));
                assert!(recursive);
                assert!(!quiet);
                assert_eq!(output, PathBuf::from("audit_result.json"));
            }
            _ => panic!("audit として解析されるべき"),
        }
    }

    #[test]
    fn test_parse_card() {
        let cli = Cli::parse_from([
            "logbook-audit", "card", "personal", "--format", "both", "--set", "full_name=Jane Doe", "--random", "--seed", "7",
        ]);
        match cli.command {
            Commands::Card { section, format, set, random, seed, .. } => {
                assert_eq!(section, "personal");
                assert_eq!(format, ExportFormat::Both);
                assert_eq!(set, vec!["full_name=Jane Doe".to_string()]);
                assert!(random);
                assert_eq!(seed, Some(7));
            }
            _ => panic!("card として解析されるべき"),
        }
    }

    #[test]
    fn test_parse_card_regen() {
        let cli = Cli::parse_from(["logbook-audit", "card", "contact", "--regen", "email", "--regen", "phone"]);
        match cli.command {
            Commands::Card { regen, random, .. } => {
                assert_eq!(regen, vec!["email".to_string(), "phone".to_string()]);
                assert!(!random);
            }
            _ => panic!("card として解析されるべき"),
        }
    }

    #[test]
    fn test_parse_show_tab() {
        let cli = Cli::parse_from(["logbook-audit", "show", "r.json", "--tab", "ads"]);
        match cli.command {
            Commands::Show { tab, .. } => assert_eq!(tab, Some(AuditTab::AirworthinessDirectives)),
            _ => panic!("show として解析されるべき"),
        }
    }

    #[test]
    fn test_batch_size_defaults_to_config() {
        let cli = Cli::parse_from(["logbook-audit", "audit", "a.jpg"]);
        match cli.command {
            Commands::Audit { batch_size, .. } => assert_eq!(batch_size, None),
            _ => panic!("audit として解析されるべき"),
        }
    }
}
