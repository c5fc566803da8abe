use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarimboError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Pasta não encontrada: {0}")]
    FolderNotFound(String),

    #[error("Nenhum arquivo BMP encontrado: {0}")]
    NoBmpFound(String),

    #[error("Atribuição inválida: {0} (use campo=valor)")]
    InvalidAssignment(String),

    #[error("--data-uri aceita apenas um arquivo")]
    DataUriNeedsSingleFile,

    #[error("Erro de entrada interativa: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Erro de JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] carimbo_common::Error),
}

pub type Result<T> = std::result::Result<T, CarimboError>;
