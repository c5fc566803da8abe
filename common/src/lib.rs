//! Carimbo de Rede Externa - 共通ライブラリ
//!
//! CLIとWeb(WASM)で共有される型とロジック:
//! - carimbo フォーム（距離の自動計算・必須チェック・レポート生成）
//! - BMP → PNG/JPEG 変換（透かし付き）
//! - 通知（トースト）の状態

pub mod types;
pub mod error;
pub mod distance;
pub mod validation;
pub mod report;
pub mod form;
pub mod notifier;
pub mod messages;
pub mod convert;

/// レポートの署名・画像の透かしに使う文字列
pub const AUTHOR_SIGNATURE: &str = "Dev By TonyCampos";

pub use types::{Deslocamento, StampField, StampRecord, TipoChamado};
pub use error::{Error, Result};
pub use distance::{derive_distance, recompute_distances, DistanceUpdate};
pub use validation::{validate, FieldError, ValidationResult};
pub use report::{generate_report, strip_decorations, StampReport};
pub use form::StampForm;
pub use notifier::{Notification, Notifier, Severity, NOTIFICATION_DURATION};
pub use convert::{
    convert_bytes, convert_file, is_bmp, output_file_name, ConversionJob, ConversionState,
    ConvertedImage, ConverterSession, FileSource, OutputFormat, SelectedFile,
};
