//! 利用者向けの成功メッセージ
//!
//! エラー側のメッセージは `Error` の Display を使う。

pub const STAMP_GENERATED: &str = "Carimbo gerado com sucesso!";
pub const FORM_CLEARED: &str = "Formulário limpo com sucesso!";
pub const STAMP_COPIED: &str = "Carimbo copiado com sucesso!";
pub const IMAGE_CONVERTED: &str = "Imagem convertida com sucesso!";
