//! carimbo レポートの生成
//!
//! 入力済みフィールドを固定順に「ラベル: 値」で並べ、先頭に日時行を付ける。
//! 表示用には装飾行（バッジ・タイトル・署名）で囲む。コピー時は装飾行を除く。

use crate::error::{Error, Result};
use crate::types::StampRecord;
use crate::validation::validate;
use crate::AUTHOR_SIGNATURE;
use chrono::NaiveDateTime;
use regex::Regex;
use std::fmt;

/// 表示用バッジ
pub const OFFICIAL_BADGE: &str = "CARIMBO OFICIAL";
/// 表示用タイトル
pub const REPORT_TITLE: &str = "### CARIMBO DE REDE EXTERNA ###";
/// 日時行のラベル
pub const TIMESTAMP_LABEL: &str = "Data/Hora";
/// 距離フィールドの単位
pub const DISTANCE_SUFFIX: &str = " metros";

/// レポートの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub label: &'static str,
    pub value: String,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// 生成済みレポート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampReport {
    pub timestamp: String,
    pub lines: Vec<ReportLine>,
}

impl StampReport {
    /// 日時行 + 各フィールド行（装飾なし）
    pub fn body(&self) -> String {
        std::iter::once(format!("{}: {}", TIMESTAMP_LABEL, self.timestamp))
            .chain(self.lines.iter().map(ReportLine::to_string))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 装飾行付きの表示用テキスト
    pub fn render(&self) -> String {
        format!(
            "{}\n{}\n\n{}\n\n{}",
            OFFICIAL_BADGE,
            REPORT_TITLE,
            self.body(),
            AUTHOR_SIGNATURE
        )
    }

    /// クリップボードにコピーする本文
    pub fn copy_text(&self) -> String {
        strip_decorations(&self.render())
    }
}

impl fmt::Display for StampReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// pt-BR の日時表記（dd/mm/aaaa, HH:MM:SS）
pub fn format_timestamp(now: NaiveDateTime) -> String {
    now.format("%d/%m/%Y, %H:%M:%S").to_string()
}

/// レポートを生成する
///
/// 必須フィールドが空なら `Error::Validation`。`now` 以外の外部状態は読まない。
pub fn generate_report(record: &StampRecord, now: NaiveDateTime) -> Result<StampReport> {
    let validation = validate(record);
    if !validation.is_ok() {
        return Err(Error::Validation(validation.keys()));
    }

    let lines: Vec<ReportLine> = record
        .entries()
        .filter_map(|(field, value)| {
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            let value = if field.is_distance() {
                format!("{}{}", value, DISTANCE_SUFFIX)
            } else {
                value.to_string()
            };
            Some(ReportLine {
                label: field.label(),
                value,
            })
        })
        .collect();

    tracing::debug!(lines = lines.len(), "stamp report generated");

    Ok(StampReport {
        timestamp: format_timestamp(now),
        lines,
    })
}

/// 表示用テキストから装飾行を除き、空行を詰めて返す
pub fn strip_decorations(text: &str) -> String {
    lazy_static::lazy_static! {
        static ref BADGE_RE: Regex = Regex::new(r"^CARIMBO OFICIAL\n").unwrap();
        static ref TITLE_RE: Regex = Regex::new(r"^### CARIMBO DE REDE EXTERNA ###\n").unwrap();
        static ref BLANK_LINES_RE: Regex = Regex::new(r"\n\s*\n").unwrap();
        static ref SIGNATURE_RE: Regex = Regex::new(r"Dev By TonyCampos\s*$").unwrap();
    }

    let text = BADGE_RE.replace(text, "");
    let text = TITLE_RE.replace(&text, "");
    let text = BLANK_LINES_RE.replace_all(&text, "\n");
    let text = SIGNATURE_RE.replace(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Deslocamento, StampField};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 15)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap()
    }

    fn filled_record() -> StampRecord {
        StampRecord {
            technician: "Maria 11988887777".to_string(),
            cable_route: "CTO-01 > CEO-07".to_string(),
            client: "ACME Ltda".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(now()), "15/10/2026, 14:30:05");
    }

    #[test]
    fn test_generate_report_validation_error() {
        let err = generate_report(&StampRecord::default(), now()).unwrap_err();
        match err {
            Error::Validation(keys) => assert_eq!(keys, vec!["tecnico", "rotaCabo", "cliente"]),
            other => panic!("想定外のエラー: {:?}", other),
        }
    }

    #[test]
    fn test_generate_report_minimal() {
        let report = generate_report(&filled_record(), now()).unwrap();
        assert_eq!(report.timestamp, "15/10/2026, 14:30:05");

        // フラグ2つは既定値が入っているので常に出力される
        let labels: Vec<_> = report.lines.iter().map(|l| l.label).collect();
        assert_eq!(
            labels,
            vec![
                "Técnico - Nome/TEL",
                "Rota Completa do Cabo",
                "Houve Deslocamento",
                "TA ou Ticket",
                "Cliente",
            ]
        );
    }

    #[test]
    fn test_report_omits_blank_fields_and_trims() {
        let mut record = filled_record();
        record.rack = "   ".to_string();
        record.tray = " 3 ".to_string();

        let report = generate_report(&record, now()).unwrap();
        let body = report.body();
        assert!(!body.contains("Bastidor"));
        assert!(body.contains("Bandeja: 3\n"));
    }

    #[test]
    fn test_distance_suffix() {
        let mut record = filled_record();
        record.measurement_central_to_client = "120.50".to_string();
        record.total_distance = "200.75".to_string();
        record.displacement = Deslocamento::Sim;

        let body = generate_report(&record, now()).unwrap().body();
        assert!(body.contains(
            "Medição do Ponto de Ruptura: CENTRAL para Cliente (metros): 120.50 metros"
        ));
        assert!(body.contains("Distância total entre os pontos envolvidos (metros): 200.75 metros"));
        assert!(body.contains("Houve Deslocamento: Sim"));
        assert!(!body.contains("Cliente para CENTRAL"));
    }

    #[test]
    fn test_each_field_exactly_once_in_order() {
        let mut record = StampRecord::default();
        for field in StampField::ALL {
            if !field.is_flag() {
                record.set(field, format!("v-{}", field.key())).unwrap();
            }
        }

        let report = generate_report(&record, now()).unwrap();
        assert_eq!(report.lines.len(), StampField::ALL.len());
        for (line, field) in report.lines.iter().zip(StampField::ALL) {
            assert_eq!(line.label, field.label());
        }
    }

    #[test]
    fn test_body_first_line_is_timestamp() {
        let body = generate_report(&filled_record(), now()).unwrap().body();
        assert_eq!(body.lines().next(), Some("Data/Hora: 15/10/2026, 14:30:05"));
    }

    #[test]
    fn test_render_has_decorations() {
        let rendered = generate_report(&filled_record(), now()).unwrap().render();
        assert!(rendered.starts_with("CARIMBO OFICIAL\n### CARIMBO DE REDE EXTERNA ###\n"));
        assert!(rendered.ends_with("Dev By TonyCampos"));
    }

    #[test]
    fn test_copy_text_strips_decorations() {
        let report = generate_report(&filled_record(), now()).unwrap();
        assert_eq!(report.copy_text(), report.body());
    }

    #[test]
    fn test_strip_decorations_collapses_blank_lines() {
        let text = "CARIMBO OFICIAL\n### CARIMBO DE REDE EXTERNA ###\n\nData/Hora: x\n\n  \nCliente: y\nDev By TonyCampos  \n";
        assert_eq!(strip_decorations(text), "Data/Hora: x\nCliente: y");
    }

    #[test]
    fn test_strip_decorations_plain_text_unchanged() {
        assert_eq!(strip_decorations("Cliente: y"), "Cliente: y");
    }
}
