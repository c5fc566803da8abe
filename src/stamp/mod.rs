//! carimbo の生成（非対話）
//!
//! レコードの組み立て順:
//! 1. 既定値
//! 2. 設定の技術者名（空のときだけ）
//! 3. 入力JSON
//! 4. `--set campo=valor`（指定順、入力したフィールドにフォーカス）

pub mod interactive;

use crate::error::{CarimboError, Result};
use carimbo_common::{StampField, StampForm, StampRecord, StampReport};
use std::path::Path;

/// `campo=valor` を分解する
///
/// フィールド名はキー（`tecnico` など）で、大文字小文字は区別しない。
pub fn parse_assignment(text: &str) -> Result<(StampField, String)> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| CarimboError::InvalidAssignment(text.to_string()))?;

    if key.trim().is_empty() {
        return Err(CarimboError::InvalidAssignment(text.to_string()));
    }

    let field: StampField = key.parse()?;
    Ok((field, value.to_string()))
}

/// JSONファイルからレコードを読む
pub fn load_record(path: &Path) -> Result<StampRecord> {
    if !path.exists() {
        return Err(CarimboError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let record: StampRecord = serde_json::from_str(&content)?;
    Ok(record)
}

/// レコードをJSONで保存
pub fn save_record(record: &StampRecord, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// 空のレコード（テンプレート）のJSON
pub fn template_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&StampRecord::default())?)
}

/// フォームを組み立てる
///
/// 読み込んだレコードはフォーカスなしで一度距離を再計算し、
/// その後の割り当ては画面入力と同じく1件ずつ反映する。
pub fn build_form(
    record: Option<StampRecord>,
    technician: Option<String>,
    assignments: &[(StampField, String)],
) -> Result<StampForm> {
    let mut record = record.unwrap_or_default();
    if record.technician.trim().is_empty() {
        if let Some(name) = technician {
            record.technician = name;
        }
    }

    let mut form = StampForm::with_record(record);
    form.recompute();

    for (field, value) in assignments {
        form.input(*field, value)?;
    }

    Ok(form)
}

/// 生成済みレポートをファイルに書く（装飾付き）
pub fn write_report(report: &StampReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, report.render())?;
    Ok(())
}

/// 未入力の必須フィールドをラベルで表示
pub fn print_missing(form: &StampForm) {
    for field in StampField::REQUIRED {
        if let Some(message) = form.error(field) {
            println!("  ✖ {}: {}", field.label(), message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carimbo_common::Deslocamento;
    use tempfile::tempdir;

    #[test]
    fn test_parse_assignment() {
        let (field, value) = parse_assignment("tecnico=Maria 11988887777").unwrap();
        assert_eq!(field, StampField::Technician);
        assert_eq!(value, "Maria 11988887777");

        // 値に '=' を含んでもよい
        let (field, value) = parse_assignment("rotaCabo=A=B").unwrap();
        assert_eq!(field, StampField::CableRoute);
        assert_eq!(value, "A=B");
    }

    #[test]
    fn test_parse_assignment_invalid() {
        assert!(matches!(
            parse_assignment("tecnico"),
            Err(CarimboError::InvalidAssignment(_))
        ));
        assert!(matches!(
            parse_assignment("=valor"),
            Err(CarimboError::InvalidAssignment(_))
        ));
        assert!(matches!(
            parse_assignment("naoExiste=1"),
            Err(CarimboError::Common(carimbo_common::Error::UnknownField(_)))
        ));
    }

    #[test]
    fn test_build_form_assignments_in_order() {
        let assignments = vec![
            parse_assignment("medicaoCentralCliente=100").unwrap(),
            parse_assignment("medicaoClienteCentral=50.5").unwrap(),
        ];
        let form = build_form(None, None, &assignments).unwrap();
        assert_eq!(form.record().total_distance, "150.50");
    }

    #[test]
    fn test_build_form_focus_keeps_typed_total() {
        let assignments = vec![
            parse_assignment("medicaoCentralCliente=100").unwrap(),
            parse_assignment("medicaoClienteCentral=50").unwrap(),
            parse_assignment("distanciaTotal=200").unwrap(),
        ];
        let form = build_form(None, None, &assignments).unwrap();
        // 合計を入力中なので B = 合計 - A
        assert_eq!(form.record().total_distance, "200");
        assert_eq!(form.record().measurement_client_to_central, "100.00");
    }

    #[test]
    fn test_build_form_technician_prefill() {
        let form = build_form(None, Some("João".into()), &[]).unwrap();
        assert_eq!(form.record().technician, "João");

        let record = StampRecord {
            technician: "Ana".into(),
            ..Default::default()
        };
        let form = build_form(Some(record), Some("João".into()), &[]).unwrap();
        assert_eq!(form.record().technician, "Ana", "既存の値は上書きしない");
    }

    #[test]
    fn test_build_form_invalid_flag() {
        let assignments = vec![(StampField::Displacement, "talvez".to_string())];
        assert!(build_form(None, None, &assignments).is_err());

        let assignments = vec![(StampField::Displacement, "Sim".to_string())];
        let form = build_form(None, None, &assignments).unwrap();
        assert_eq!(form.record().displacement, Deslocamento::Sim);
    }

    #[test]
    fn test_record_roundtrip_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("carimbo.json");

        let record = StampRecord {
            client: "ACME".into(),
            ..Default::default()
        };
        save_record(&record, &path).unwrap();
        assert_eq!(load_record(&path).unwrap(), record);
    }

    #[test]
    fn test_load_record_missing() {
        let result = load_record(Path::new("/nonexistent/carimbo.json"));
        assert!(matches!(result, Err(CarimboError::FileNotFound(_))));
    }

    #[test]
    fn test_template_json_keys() {
        let json = template_json().unwrap();
        assert!(json.contains("\"tecnico\": \"\""));
        assert!(json.contains("\"houveDeslocamento\": \"Não\""));
        assert!(json.contains("\"TAouTicket\": \"TA\""));
    }
}
