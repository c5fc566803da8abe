//! 距離フィールドの自動計算
//!
//! 測定A（CENTRAL→Cliente）、測定B（Cliente→CENTRAL）、総距離の3つのうち
//! 2つが数値なら残り1つを計算する。入力中（フォーカス中）のフィールドは
//! 上書きしない。
//!
//! 判定順序（この順で最初に成立したものだけ適用）:
//! 1. A・Bが数値、総距離が入力中でない → 総距離 = A + B
//! 2. 総距離・Aが数値、Bが入力中でない → B = 総距離 - A
//! 3. 総距離・Bが数値、Aが入力中でない → A = 総距離 - B

use crate::types::{StampField, StampRecord};
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

/// 自動計算の結果（上書きするフィールドと値）
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceUpdate {
    pub field: StampField,
    pub value: String,
}

/// 先頭の10進数表記を数値として読む（parseFloat 相当）
///
/// 空文字・数値で始まらない文字列は None。
pub fn parse_number(text: &str) -> Option<f64> {
    lazy_static::lazy_static! {
        static ref NUMBER_RE: Regex =
            Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap();
    }

    let m = NUMBER_RE.find(text.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 小数点以下2桁の固定小数表記（toFixed(2) 相当）
///
/// f64 が実際に持つ2進値を10進に直してから丸める。ちょうど中間の値だけ
/// 0から遠い方へ丸めるので、0.015（実体は 0.01499...）は "0.01" になる。
pub fn format_fixed2(value: f64) -> String {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        // Decimal の範囲外（極端に大きい値）
        return format!("{:.2}", value);
    };

    let rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // -0.00 は 0.00 に揃える
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{:.2}", rounded)
}

/// 3つの距離フィールドから、上書きすべき1フィールドを求める
///
/// `focused` は利用者が入力中のフィールド（なければ None）。
pub fn derive_distance(record: &StampRecord, focused: Option<StampField>) -> Option<DistanceUpdate> {
    let a = parse_number(&record.measurement_central_to_client);
    let b = parse_number(&record.measurement_client_to_central);
    let total = parse_number(&record.total_distance);
    let is_focused = |field: StampField| focused == Some(field);

    let (field, value) = match (a, b, total) {
        (Some(a), Some(b), _) if !is_focused(StampField::TotalDistance) => {
            (StampField::TotalDistance, a + b)
        }
        (Some(a), _, Some(total)) if !is_focused(StampField::MeasurementClientToCentral) => {
            (StampField::MeasurementClientToCentral, total - a)
        }
        (_, Some(b), Some(total)) if !is_focused(StampField::MeasurementCentralToClient) => {
            (StampField::MeasurementCentralToClient, total - b)
        }
        _ => return None,
    };

    Some(DistanceUpdate {
        field,
        value: format_fixed2(value),
    })
}

/// 自動計算を適用し、更新したフィールドを返す
pub fn recompute_distances(record: &mut StampRecord, focused: Option<StampField>) -> Option<StampField> {
    let update = derive_distance(record, focused)?;
    tracing::debug!(field = update.field.key(), value = %update.value, "distance derived");

    match update.field {
        StampField::TotalDistance => record.total_distance = update.value,
        StampField::MeasurementClientToCentral => record.measurement_client_to_central = update.value,
        StampField::MeasurementCentralToClient => record.measurement_central_to_client = update.value,
        _ => return None,
    }
    Some(update.field)
}
