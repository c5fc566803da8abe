//! BMP → PNG/JPEG 変換
//!
//! - 入力はBMPのみ（MIMEタイプ `image/bmp` または拡張子 `.bmp`）
//! - 変換は1件ずつ。変換中の再変換は受け付けない
//! - 出力ファイル名は `<元のベース名>.<拡張子>`

pub mod pipeline;
pub mod watermark;

pub use pipeline::{convert_bytes, convert_file, FileSource};

use crate::error::{Error, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// BMPのMIMEタイプ
pub const BMP_MIME: &str = "image/bmp";
/// JPEG品質（0.9）
pub const JPEG_QUALITY: u8 = 90;

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Png, OutputFormat::Jpeg];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 選択されたファイル（中身は変換時に読む）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// BMPとして受け付けるか（中身は見ない）
pub fn is_bmp(name: &str, mime_type: &str) -> bool {
    mime_type == BMP_MIME || name.to_lowercase().ends_with(".bmp")
}

/// 出力ファイル名: 最後の拡張子を出力形式の拡張子に置き換える
pub fn output_file_name(original: &str, format: OutputFormat) -> String {
    let base = match original.rfind('.') {
        Some(dot) if dot + 1 < original.len() && !original[dot + 1..].contains('/') => {
            &original[..dot]
        }
        _ => original,
    };
    format!("{}.{}", base, format.extension())
}

/// 変換結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub file_name: String,
    /// セッション内の通し番号（プレビューの更新判定用）
    pub version: u64,
}

impl ConvertedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// ダウンロード用の data URI
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// 変換の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionState {
    #[default]
    Idle,
    Selected,
    Converting,
    Converted,
    Failed,
}

/// 1回の変換要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub file: SelectedFile,
    pub format: OutputFormat,
}

/// 変換セッション（ファイル選択・形式・結果を保持）
#[derive(Debug, Clone, Default)]
pub struct ConverterSession {
    selected: Option<SelectedFile>,
    format: OutputFormat,
    state: ConversionState,
    output: Option<ConvertedImage>,
    version: u64,
}

impl ConverterSession {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn state(&self) -> ConversionState {
        self.state
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn output(&self) -> Option<&ConvertedImage> {
        self.output.as_ref()
    }

    pub fn is_converting(&self) -> bool {
        self.state == ConversionState::Converting
    }

    /// 変換ボタンを押せるか
    pub fn can_convert(&self) -> bool {
        self.selected.is_some() && !self.is_converting()
    }

    /// ファイルを選択する。BMP以外は拒否し、以前の選択はそのまま。
    pub fn select_file(&mut self, file: SelectedFile) -> Result<()> {
        if self.is_converting() {
            return Err(Error::ConversionInProgress);
        }
        if !is_bmp(&file.name, &file.mime_type) {
            return Err(Error::InvalidFormat(file.name));
        }

        tracing::debug!(name = %file.name, "bmp selected");
        self.selected = Some(file);
        self.output = None;
        self.state = ConversionState::Selected;
        Ok(())
    }

    /// 変換を開始する
    pub fn begin(&mut self) -> Result<ConversionJob> {
        if self.is_converting() {
            return Err(Error::ConversionInProgress);
        }
        let file = self.selected.clone().ok_or(Error::NoFileSelected)?;

        self.state = ConversionState::Converting;
        Ok(ConversionJob {
            file,
            format: self.format,
        })
    }

    /// 変換を終了し、結果を保持する
    pub fn finish(&mut self, result: Result<ConvertedImage>) -> Result<&ConvertedImage> {
        match result {
            Ok(mut image) => {
                self.version += 1;
                image.version = self.version;
                self.state = ConversionState::Converted;
                Ok(self.output.insert(image))
            }
            Err(e) => {
                tracing::debug!(error = %e, detail = e.detail().unwrap_or(""), "conversion failed");
                self.state = ConversionState::Failed;
                Err(e)
            }
        }
    }
}
