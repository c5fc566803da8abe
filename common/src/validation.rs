//! 必須フィールドの検証

use crate::types::{StampField, StampRecord};

/// 必須フィールド未入力時のメッセージ
pub const REQUIRED_MESSAGE: &str = "Campo obrigatório";

/// フィールド単位の検証エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: StampField,
    pub message: &'static str,
}

/// 検証結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: StampField) -> Option<&'static str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message)
    }

    /// エラーになったフィールドのキー一覧
    pub fn keys(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field.key()).collect()
    }
}

/// 必須フィールド（trim後に空）ごとに1件のエラーを返す
pub fn validate(record: &StampRecord) -> ValidationResult {
    let errors = StampField::REQUIRED
        .iter()
        .filter(|&&field| record.get(field).trim().is_empty())
        .map(|&field| FieldError {
            field,
            message: REQUIRED_MESSAGE,
        })
        .collect();

    ValidationResult { errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_all_empty() {
        let result = validate(&StampRecord::default());
        assert!(!result.is_ok());
        assert_eq!(result.errors.len(), 3);
        assert_eq!(result.keys(), vec!["tecnico", "rotaCabo", "cliente"]);
        assert_eq!(result.error_for(StampField::Client), Some("Campo obrigatório"));
    }

    #[test]
    fn test_validate_whitespace_only() {
        let record = StampRecord {
            technician: "   ".to_string(),
            cable_route: "\t".to_string(),
            client: "ACME".to_string(),
            ..Default::default()
        };
        let result = validate(&record);
        assert_eq!(result.keys(), vec!["tecnico", "rotaCabo"]);
        assert_eq!(result.error_for(StampField::Client), None);
    }

    #[test]
    fn test_validate_ok() {
        let record = StampRecord {
            technician: "Maria".to_string(),
            cable_route: "CTO-01".to_string(),
            client: "ACME".to_string(),
            ..Default::default()
        };
        let result = validate(&record);
        assert!(result.is_ok());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_optional_fields_not_validated() {
        let record = StampRecord {
            technician: "Maria".to_string(),
            cable_route: "CTO-01".to_string(),
            client: "ACME".to_string(),
            cable_number: String::new(),
            ..Default::default()
        };
        assert!(validate(&record).is_ok());
    }
}
