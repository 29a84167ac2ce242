//! 入力ファイル読み込み
//!
//! 画像/PDFを送信可能な PageImage の列に変換する。
//! PDFは全ページを固定倍率でラスタライズし、1ページ1画像にする。

mod pdf;

pub use pdf::{rasterize_pdf, PDF_UPSCALE};

use crate::error::{AuditError, Result};
use base64::Engine;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// アップロードを受け付ける拡張子
const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];

/// 送信可能な1枚の画像
#[derive(Debug, Clone, PartialEq)]
pub struct PageImage {
    pub name: String,
    pub data: Vec<u8>,
    /// 画像サブタイプ（png / jpeg）
    pub subtype: String,
}

impl PageImage {
    /// `data:image/<subtype>;base64,...` 形式
    pub fn to_data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:image/{};base64,{}", self.subtype, encoded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Image(&'static str),
    Pdf,
}

fn classify(path: &Path) -> Option<InputKind> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some(InputKind::Image("jpeg")),
        "png" => Some(InputKind::Image("png")),
        "pdf" => Some(InputKind::Pdf),
        _ => None,
    }
}

fn is_accepted(path: &Path) -> bool {
    path.extension()
        .map(|e| ACCEPTED_EXTENSIONS.contains(&e.to_string_lossy().to_lowercase().as_str()))
        .unwrap_or(false)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// 引数のパスを実ファイルの列に展開
///
/// フォルダは受付拡張子のファイルだけをファイル名順に並べる。
/// 明示されたファイルが対象外の拡張子ならエラー。
pub fn collect_files(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(AuditError::FileNotFound(path.display().to_string()));
        }

        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .max_depth(if recursive { usize::MAX } else { 1 })
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| p.is_file())
                .filter(|p| {
                    let ok = is_accepted(p);
                    if !ok {
                        tracing::debug!(path = %p.display(), "対象外のファイルをスキップ");
                    }
                    ok
                })
                .collect();

            // ファイル名でソート
            found.sort_by_key(|p| file_name_of(p));
            files.extend(found);
        } else if is_accepted(path) {
            files.push(path.clone());
        } else {
            return Err(AuditError::UnsupportedFile(path.display().to_string()));
        }
    }

    Ok(files)
}

/// ファイル1つを PageImage に変換（PDFは複数ページ）
pub fn load_file(path: &Path) -> Result<Vec<PageImage>> {
    let kind = classify(path).ok_or_else(|| AuditError::UnsupportedFile(path.display().to_string()))?;
    let name = file_name_of(path);
    let data = std::fs::read(path)?;

    match kind {
        InputKind::Image(subtype) => Ok(vec![PageImage {
            name,
            data,
            subtype: subtype.to_string(),
        }]),
        InputKind::Pdf => rasterize_pdf(&name, &data),
    }
}

/// 入力パス群を読み込み、送信順の画像列を返す
///
/// # Returns
/// (読み込んだファイル数, 画像列)
pub fn load_inputs(paths: &[PathBuf], recursive: bool) -> Result<(usize, Vec<PageImage>)> {
    let files = collect_files(paths, recursive)?;
    let mut images = Vec::new();

    for file in &files {
        let pages = load_file(file)?;
        tracing::debug!(file = %file.display(), pages = pages.len(), "入力を読み込みました");
        images.extend(pages);
    }

    Ok((files.len(), images))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_classify() {
        assert_eq!(classify(Path::new("a.JPG")), Some(InputKind::Image("jpeg")));
        assert_eq!(classify(Path::new("a.jpeg")), Some(InputKind::Image("jpeg")));
        assert_eq!(classify(Path::new("a.png")), Some(InputKind::Image("png")));
        assert_eq!(classify(Path::new("log.PDF")), Some(InputKind::Pdf));
        assert_eq!(classify(Path::new("a.gif")), None);
        assert_eq!(classify(Path::new("noext")), None);
    }

    #[test]
    fn test_data_url() {
        let image = PageImage {
            name: "p.png".to_string(),
            data: b"abc".to_vec(),
            subtype: "png".to_string(),
        };
        assert_eq!(image.to_data_url(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_collect_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("c.png"), b"c").unwrap();
        fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        fs::write(dir.path().join("b.JPEG"), b"b").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], false).unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name_of(p)).collect();
        assert_eq!(names, vec!["a.jpg", "b.JPEG", "c.png"]);
    }

    #[test]
    fn test_collect_files_not_recursive_by_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("deep.png"), b"d").unwrap();
        fs::write(dir.path().join("top.png"), b"t").unwrap();

        assert_eq!(collect_files(&[dir.path().to_path_buf()], false).unwrap().len(), 1);
        assert_eq!(collect_files(&[dir.path().to_path_buf()], true).unwrap().len(), 2);
    }

    #[test]
    fn test_explicit_unsupported_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.gif");
        fs::write(&path, b"gif").unwrap();

        let result = collect_files(&[path], false);
        assert!(matches!(result, Err(AuditError::UnsupportedFile(_))));
    }

    #[test]
    fn test_load_inputs_keeps_argument_order() {
        let dir = tempfile::tempdir().unwrap();
        let second = dir.path().join("b.png");
        let first = dir.path().join("z.jpg");
        fs::write(&second, b"png-bytes").unwrap();
        fs::write(&first, b"jpg-bytes").unwrap();

        let (count, images) = load_inputs(&[first, second], false).unwrap();
        assert_eq!(count, 2);
        assert_eq!(images[0].name, "z.jpg");
        assert_eq!(images[0].subtype, "jpeg");
        assert_eq!(images[0].data, b"jpg-bytes");
        assert_eq!(images[1].name, "b.png");
        assert_eq!(images[1].subtype, "png");
    }
}
