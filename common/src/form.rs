//! carimbo フォームの状態
//!
//! レコード・検証エラー・生成済みレポートをまとめて保持する。
//! UI（Web / CLI対話）はこの状態を介してのみ操作する。

use crate::distance::recompute_distances;
use crate::error::{Error, Result};
use crate::report::{generate_report, StampReport};
use crate::types::{StampField, StampRecord};
use crate::validation::validate;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// クリア確認のメッセージ
pub const CLEAR_CONFIRM_MESSAGE: &str = "Tem certeza que deseja limpar todos os campos?";

#[derive(Debug, Clone, Default)]
pub struct StampForm {
    record: StampRecord,
    errors: BTreeMap<StampField, &'static str>,
    report: Option<StampReport>,
}

impl StampForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存レコードから開始（CLIでJSONを読んだ場合など）
    pub fn with_record(record: StampRecord) -> Self {
        Self {
            record,
            ..Self::default()
        }
    }

    pub fn record(&self) -> &StampRecord {
        &self.record
    }

    pub fn report(&self) -> Option<&StampReport> {
        self.report.as_ref()
    }

    pub fn error(&self, field: StampField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// フィールドを更新する
    ///
    /// 必須フィールドに空でない値が入ったら、そのフィールドのエラーを消す。
    pub fn update_field(&mut self, field: StampField, value: &str) -> Result<()> {
        self.record.set(field, value)?;
        if field.is_required() && !value.trim().is_empty() {
            self.errors.remove(&field);
        }
        Ok(())
    }

    /// 利用者の入力として更新し、距離の自動計算を行う
    ///
    /// 入力中のフィールド自身は自動計算で上書きしない。
    pub fn input(&mut self, field: StampField, value: &str) -> Result<Option<StampField>> {
        self.update_field(field, value)?;
        if field.is_distance() {
            Ok(recompute_distances(&mut self.record, Some(field)))
        } else {
            Ok(None)
        }
    }

    /// フォーカスなしで距離の自動計算を行う
    pub fn recompute(&mut self) -> Option<StampField> {
        recompute_distances(&mut self.record, None)
    }

    /// レポートを生成して保持する
    ///
    /// 検証に失敗した場合はエラーを記録し、以前のレポートはそのまま残す。
    pub fn generate(&mut self, now: NaiveDateTime) -> Result<&StampReport> {
        let validation = validate(&self.record);
        self.errors = validation
            .errors
            .iter()
            .map(|e| (e.field, e.message))
            .collect();

        let report = generate_report(&self.record, now)?;
        Ok(self.report.insert(report))
    }

    /// 確認が取れたら全項目を初期状態に戻す
    ///
    /// 戻り値は実際にクリアしたかどうか。
    pub fn clear<F>(&mut self, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(CLEAR_CONFIRM_MESSAGE) {
            return false;
        }
        self.record = StampRecord::default();
        self.errors.clear();
        self.report = None;
        true
    }

    /// 生成済みレポートのコピー用本文
    pub fn copy_text(&self) -> Result<String> {
        self.report
            .as_ref()
            .map(StampReport::copy_text)
            .ok_or(Error::NoReport)
    }
}
