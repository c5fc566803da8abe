//! エラー型定義
//!
//! Display はそのまま利用者向けの通知メッセージになる（ポルトガル語）。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 必須フィールドが空（フィールドキーの一覧）
    #[error("Por favor, preencha todos os campos obrigatórios.")]
    Validation(Vec<&'static str>),

    #[error("Campo desconhecido: {0}")]
    UnknownField(String),

    #[error("Valor inválido para {field}: {value}")]
    InvalidFieldValue { field: &'static str, value: String },

    #[error("Nenhum carimbo para copiar. Gere um carimbo primeiro.")]
    NoReport,

    #[error("Falha ao copiar o carimbo.")]
    Clipboard(String),

    #[error("Por favor, selecione um arquivo BMP válido.")]
    InvalidFormat(String),

    #[error("Por favor, selecione um arquivo BMP para converter.")]
    NoFileSelected,

    #[error("Uma conversão já está em andamento.")]
    ConversionInProgress,

    #[error("Erro ao ler o arquivo.")]
    Read(String),

    #[error("Arquivo de imagem inválido ou corrompido.")]
    Decode(String),

    #[error("Não foi possível processar a imagem.")]
    Encode(String),

    #[error("Formato de saída desconhecido: {0}. Use png ou jpeg")]
    UnknownFormat(String),
}

impl Error {
    /// 失敗の詳細（ログ用）。利用者向けメッセージには含めない。
    pub fn detail(&self) -> Option<&str> {
        match self {
            Error::Clipboard(d)
            | Error::InvalidFormat(d)
            | Error::Read(d)
            | Error::Decode(d)
            | Error::Encode(d) => Some(d.as_str()),
            _ => None,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_single_aggregate() {
        let error = Error::Validation(vec!["tecnico", "rotaCabo", "cliente"]);
        assert_eq!(
            error.to_string(),
            "Por favor, preencha todos os campos obrigatórios."
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            Error::InvalidFormat("foto.png".into()).to_string(),
            "Por favor, selecione um arquivo BMP válido."
        );
        assert_eq!(
            Error::NoFileSelected.to_string(),
            "Por favor, selecione um arquivo BMP para converter."
        );
        assert_eq!(
            Error::Decode("bad header".into()).to_string(),
            "Arquivo de imagem inválido ou corrompido."
        );
        assert_eq!(Error::Read("eof".into()).to_string(), "Erro ao ler o arquivo.");
        assert_eq!(
            Error::Clipboard("denied".into()).to_string(),
            "Falha ao copiar o carimbo."
        );
    }

    #[test]
    fn test_detail_not_in_display() {
        let error = Error::Decode("unexpected EOF".into());
        assert_eq!(error.detail(), Some("unexpected EOF"));
        assert!(!error.to_string().contains("EOF"));
        assert_eq!(Error::NoFileSelected.detail(), None);
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownField("observacao".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownField"));
        assert!(debug.contains("observacao"));
    }
}
