use crate::error::{CarimboError, Result};
use carimbo_common::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 技術者名の環境変数（設定ファイルより優先）
pub const TECHNICIAN_ENV: &str = "CARIMBO_TECNICO";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// 新しい carimbo の「Técnico - Nome/TEL」の初期値
    pub default_technician: Option<String>,
    pub default_format: OutputFormat,
    /// 変換結果の既定出力先（未指定なら入力と同じ場所）
    pub output_dir: Option<PathBuf>,
    /// 生成後に本文をクリップボードへコピーする
    pub copy_to_clipboard: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        tracing::debug!(path = %config_path.display(), "config saved");
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CarimboError::Config("Pasta pessoal não encontrada".into()))?;
        Ok(home.join(".config").join("carimbo-rede").join("config.json"))
    }

    /// 技術者名（環境変数を優先）
    pub fn technician(&self) -> Option<String> {
        if let Ok(value) = std::env::var(TECHNICIAN_ENV) {
            if !value.trim().is_empty() {
                return Some(value);
            }
        }

        self.default_technician
            .clone()
            .filter(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_format, OutputFormat::Png);
        assert!(config.output_dir.is_none());
        assert!(!config.copy_to_clipboard);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let json = r#"{"defaultTechnician": "Maria 11988887777", "defaultFormat": "jpeg"}"#;
        let config: Config = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(config.default_technician.as_deref(), Some("Maria 11988887777"));
        assert_eq!(config.default_format, OutputFormat::Jpeg);
        assert!(!config.copy_to_clipboard);
    }

    #[test]
    fn test_config_serialize_camel_case() {
        let config = Config {
            copy_to_clipboard: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).expect("シリアライズ失敗");
        assert!(json.contains("\"copyToClipboard\":true"));
        assert!(json.contains("\"defaultFormat\":\"png\""));
    }

    #[test]
    fn test_blank_technician_ignored() {
        let config = Config {
            default_technician: Some("   ".to_string()),
            ..Default::default()
        };
        if std::env::var(TECHNICIAN_ENV).is_err() {
            assert_eq!(config.technician(), None);
        }
    }
}
