//! BMP 変換（CLI）
//!
//! ファイル/フォルダからBMPを集め、1つの `ConverterSession` で順番に変換する。

use crate::error::{CarimboError, Result};
use carimbo_common::convert::BMP_MIME;
use carimbo_common::{
    convert_file, is_bmp, ConvertedImage, ConverterSession, Error, FileSource, OutputFormat,
    SelectedFile,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 変換対象のBMP
#[derive(Debug, Clone)]
pub struct BmpInfo {
    pub path: PathBuf,
    pub file_name: String,
}

/// ディスク上のファイル
pub struct DiskFile<'a> {
    pub path: &'a Path,
}

impl FileSource for DiskFile<'_> {
    async fn read_bytes(&self) -> carimbo_common::Result<Vec<u8>> {
        tokio::fs::read(self.path)
            .await
            .map_err(|e| Error::Read(format!("{}: {}", self.path.display(), e)))
    }
}

/// 変換結果（1ファイル分）
#[derive(Debug)]
pub struct ConvertOutcome {
    pub source: PathBuf,
    pub result: std::result::Result<ConvertedImage, Error>,
}

fn bmp_info(path: &Path) -> BmpInfo {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    BmpInfo {
        path: path.to_path_buf(),
        file_name,
    }
}

/// BMPを収集する
///
/// ファイルを直接指定した場合は拡張子を確認する。
/// フォルダは直下のみ（`recursive` でサブフォルダも）。
pub fn scan_bmp(path: &Path, recursive: bool) -> Result<Vec<BmpInfo>> {
    if path.is_file() {
        let info = bmp_info(path);
        if !is_bmp(&info.file_name, "") {
            return Err(Error::InvalidFormat(info.file_name).into());
        }
        return Ok(vec![info]);
    }

    if !path.exists() {
        return Err(CarimboError::FolderNotFound(path.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files: Vec<BmpInfo> = WalkDir::new(path)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| bmp_info(e.path()))
        .filter(|info| is_bmp(&info.file_name, ""))
        .collect();

    if files.is_empty() {
        return Err(CarimboError::NoBmpFound(path.display().to_string()));
    }

    // ファイル名でソート
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name).then_with(|| a.path.cmp(&b.path)));

    Ok(files)
}

/// 出力先のパス（未指定なら元ファイルと同じフォルダ）
pub fn output_path(source: &Path, output_dir: Option<&Path>, image: &ConvertedImage) -> PathBuf {
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| source.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(&image.file_name)
}

/// 1つのセッションで順番に変換する
///
/// 1件の失敗で中断せず、結果をまとめて返す。
pub async fn convert_all(
    files: &[BmpInfo],
    format: OutputFormat,
    show_progress: bool,
) -> Vec<ConvertOutcome> {
    let mut session = ConverterSession::new(format);
    let progress = if show_progress {
        ProgressBar::new(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
        progress.set_style(style);
    }

    let mut outcomes = Vec::with_capacity(files.len());

    for info in files {
        progress.set_message(info.file_name.clone());
        let result = convert_one(&mut session, info).await;
        outcomes.push(ConvertOutcome {
            source: info.path.clone(),
            result,
        });
        progress.inc(1);
    }

    progress.finish_and_clear();
    outcomes
}

async fn convert_one(
    session: &mut ConverterSession,
    info: &BmpInfo,
) -> std::result::Result<ConvertedImage, Error> {
    session.select_file(SelectedFile::new(info.file_name.clone(), BMP_MIME))?;
    let job = session.begin()?;
    let result = convert_file(&DiskFile { path: &info.path }, &job).await;
    session.finish(result).cloned()
}

/// 変換結果をファイルに書き出す
pub fn write_output(
    source: &Path,
    output_dir: Option<&Path>,
    image: &ConvertedImage,
) -> Result<PathBuf> {
    let path = output_path(source, output_dir, image);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, &image.bytes)?;
    tracing::debug!(path = %path.display(), bytes = image.bytes.len(), "converted image written");
    Ok(path)
}
