//! carimbo（スタンプ）レコードの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - StampField: フォームの固定フィールド一覧（表示順・ラベル付き）
//! - StampRecord: フィールド値を保持するフラットなレコード
//! - Deslocamento / TipoChamado: ラジオ選択の2値フラグ

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// フォームのフィールド（宣言順 = レポートの出力順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StampField {
    Technician,
    CableRoute,
    CableNumber,
    PriorityFibers,
    CableCapacity,
    Queue,
    Rack,
    Tray,
    MeasurementCentralToClient,
    MeasurementClientToCentral,
    TotalDistance,
    Displacement,
    DisplacementTime,
    TicketType,
    TicketNumber,
    Client,
    ClientAcknowledgment,
}

impl StampField {
    /// 全フィールド（出力順）
    pub const ALL: [StampField; 17] = [
        StampField::Technician,
        StampField::CableRoute,
        StampField::CableNumber,
        StampField::PriorityFibers,
        StampField::CableCapacity,
        StampField::Queue,
        StampField::Rack,
        StampField::Tray,
        StampField::MeasurementCentralToClient,
        StampField::MeasurementClientToCentral,
        StampField::TotalDistance,
        StampField::Displacement,
        StampField::DisplacementTime,
        StampField::TicketType,
        StampField::TicketNumber,
        StampField::Client,
        StampField::ClientAcknowledgment,
    ];

    /// 必須フィールド
    pub const REQUIRED: [StampField; 3] = [
        StampField::Technician,
        StampField::CableRoute,
        StampField::Client,
    ];

    /// JSON / フォームで使うキー
    pub fn key(&self) -> &'static str {
        match self {
            StampField::Technician => "tecnico",
            StampField::CableRoute => "rotaCabo",
            StampField::CableNumber => "numeroCabo",
            StampField::PriorityFibers => "fibrasPrioritarias",
            StampField::CableCapacity => "capacidadeCabo",
            StampField::Queue => "fila",
            StampField::Rack => "bastidor",
            StampField::Tray => "bandeja",
            StampField::MeasurementCentralToClient => "medicaoCentralCliente",
            StampField::MeasurementClientToCentral => "medicaoClienteCentral",
            StampField::TotalDistance => "distanciaTotal",
            StampField::Displacement => "houveDeslocamento",
            StampField::DisplacementTime => "tempoDeslocamento",
            StampField::TicketType => "TAouTicket",
            StampField::TicketNumber => "numeroTAouTicket",
            StampField::Client => "cliente",
            StampField::ClientAcknowledgment => "cienteRedeExterna",
        }
    }

    /// 画面・レポートに表示するラベル
    pub fn label(&self) -> &'static str {
        match self {
            StampField::Technician => "Técnico - Nome/TEL",
            StampField::CableRoute => "Rota Completa do Cabo",
            StampField::CableNumber => "Número do Cabo",
            StampField::PriorityFibers => "Fibras Prioritárias",
            StampField::CableCapacity => "Capacidade do cabo",
            StampField::Queue => "Fila",
            StampField::Rack => "Bastidor",
            StampField::Tray => "Bandeja",
            StampField::MeasurementCentralToClient => {
                "Medição do Ponto de Ruptura: CENTRAL para Cliente (metros)"
            }
            StampField::MeasurementClientToCentral => {
                "Medição do Ponto de Ruptura: Cliente para CENTRAL (metros)"
            }
            StampField::TotalDistance => "Distância total entre os pontos envolvidos (metros)",
            StampField::Displacement => "Houve Deslocamento",
            StampField::DisplacementTime => "Tempo de Deslocamento",
            StampField::TicketType => "TA ou Ticket",
            StampField::TicketNumber => "Número",
            StampField::Client => "Cliente",
            StampField::ClientAcknowledgment => "Ciente Rede Externa",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    /// 距離系フィールド（レポートで " metros" を付ける）
    pub fn is_distance(&self) -> bool {
        matches!(
            self,
            StampField::MeasurementCentralToClient
                | StampField::MeasurementClientToCentral
                | StampField::TotalDistance
        )
    }

    /// ラジオ選択（2値フラグ）のフィールド
    pub fn is_flag(&self) -> bool {
        matches!(self, StampField::Displacement | StampField::TicketType)
    }

    /// 数値入力のフィールド
    pub fn is_numeric(&self) -> bool {
        self.is_distance() || matches!(self, StampField::CableCapacity)
    }

    /// ラジオ選択の選択肢（フラグ以外は空）
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            StampField::Displacement => &["Sim", "Não"],
            StampField::TicketType => &["TA", "Ticket"],
            _ => &[],
        }
    }
}

impl fmt::Display for StampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StampField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        StampField::ALL
            .iter()
            .copied()
            .find(|field| field.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| Error::UnknownField(key.to_string()))
    }
}

/// 移動の有無（Houve Deslocamento）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Deslocamento {
    #[serde(rename = "Sim")]
    Sim,
    #[default]
    #[serde(rename = "Não")]
    Nao,
}

impl Deslocamento {
    pub const OPTIONS: [Deslocamento; 2] = [Deslocamento::Sim, Deslocamento::Nao];

    pub fn as_str(&self) -> &'static str {
        match self {
            Deslocamento::Sim => "Sim",
            Deslocamento::Nao => "Não",
        }
    }
}

impl FromStr for Deslocamento {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Sim" | "sim" | "SIM" => Ok(Deslocamento::Sim),
            "Não" | "não" | "NÃO" | "Nao" | "nao" | "NAO" => Ok(Deslocamento::Nao),
            other => Err(Error::InvalidFieldValue {
                field: StampField::Displacement.key(),
                value: other.to_string(),
            }),
        }
    }
}

/// 受付種別（TA ou Ticket）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TipoChamado {
    #[default]
    #[serde(rename = "TA")]
    Ta,
    #[serde(rename = "Ticket")]
    Ticket,
}

impl TipoChamado {
    pub const OPTIONS: [TipoChamado; 2] = [TipoChamado::Ta, TipoChamado::Ticket];

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoChamado::Ta => "TA",
            TipoChamado::Ticket => "Ticket",
        }
    }
}

impl FromStr for TipoChamado {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("ta") {
            Ok(TipoChamado::Ta)
        } else if value.eq_ignore_ascii_case("ticket") {
            Ok(TipoChamado::Ticket)
        } else {
            Err(Error::InvalidFieldValue {
                field: StampField::TicketType.key(),
                value: value.to_string(),
            })
        }
    }
}

/// carimbo のフォームデータ
///
/// JSONキーは元のフォームと同じ（camelCase + `TAouTicket`）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampRecord {
    #[serde(rename = "tecnico")]
    pub technician: String,
    #[serde(rename = "rotaCabo")]
    pub cable_route: String,
    #[serde(rename = "numeroCabo")]
    pub cable_number: String,
    #[serde(rename = "fibrasPrioritarias")]
    pub priority_fibers: String,
    #[serde(rename = "capacidadeCabo")]
    pub cable_capacity: String,
    #[serde(rename = "fila")]
    pub queue: String,
    #[serde(rename = "bastidor")]
    pub rack: String,
    #[serde(rename = "bandeja")]
    pub tray: String,
    #[serde(rename = "medicaoCentralCliente")]
    pub measurement_central_to_client: String, // 測定A（CENTRAL→Cliente）
    #[serde(rename = "medicaoClienteCentral")]
    pub measurement_client_to_central: String, // 測定B（Cliente→CENTRAL）
    #[serde(rename = "distanciaTotal")]
    pub total_distance: String,
    #[serde(rename = "houveDeslocamento")]
    pub displacement: Deslocamento,
    #[serde(rename = "tempoDeslocamento")]
    pub displacement_time: String,
    #[serde(rename = "TAouTicket")]
    pub ticket_type: TipoChamado,
    #[serde(rename = "numeroTAouTicket")]
    pub ticket_number: String,
    #[serde(rename = "cliente")]
    pub client: String,
    #[serde(rename = "cienteRedeExterna")]
    pub client_acknowledgment: String,
}

impl StampRecord {
    /// フィールド値を文字列として取得
    pub fn get(&self, field: StampField) -> &str {
        match field {
            StampField::Technician => &self.technician,
            StampField::CableRoute => &self.cable_route,
            StampField::CableNumber => &self.cable_number,
            StampField::PriorityFibers => &self.priority_fibers,
            StampField::CableCapacity => &self.cable_capacity,
            StampField::Queue => &self.queue,
            StampField::Rack => &self.rack,
            StampField::Tray => &self.tray,
            StampField::MeasurementCentralToClient => &self.measurement_central_to_client,
            StampField::MeasurementClientToCentral => &self.measurement_client_to_central,
            StampField::TotalDistance => &self.total_distance,
            StampField::Displacement => self.displacement.as_str(),
            StampField::DisplacementTime => &self.displacement_time,
            StampField::TicketType => self.ticket_type.as_str(),
            StampField::TicketNumber => &self.ticket_number,
            StampField::Client => &self.client,
            StampField::ClientAcknowledgment => &self.client_acknowledgment,
        }
    }

    /// フィールド値を設定
    ///
    /// フラグ系フィールドは2値以外を受け付けない。
    pub fn set(&mut self, field: StampField, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        match field {
            StampField::Displacement => self.displacement = value.parse()?,
            StampField::TicketType => self.ticket_type = value.parse()?,
            _ => {
                if let Some(slot) = self.text_slot_mut(field) {
                    *slot = value;
                }
            }
        }
        Ok(())
    }

    fn text_slot_mut(&mut self, field: StampField) -> Option<&mut String> {
        let slot = match field {
            StampField::Technician => &mut self.technician,
            StampField::CableRoute => &mut self.cable_route,
            StampField::CableNumber => &mut self.cable_number,
            StampField::PriorityFibers => &mut self.priority_fibers,
            StampField::CableCapacity => &mut self.cable_capacity,
            StampField::Queue => &mut self.queue,
            StampField::Rack => &mut self.rack,
            StampField::Tray => &mut self.tray,
            StampField::MeasurementCentralToClient => &mut self.measurement_central_to_client,
            StampField::MeasurementClientToCentral => &mut self.measurement_client_to_central,
            StampField::TotalDistance => &mut self.total_distance,
            StampField::DisplacementTime => &mut self.displacement_time,
            StampField::TicketNumber => &mut self.ticket_number,
            StampField::Client => &mut self.client,
            StampField::ClientAcknowledgment => &mut self.client_acknowledgment,
            StampField::Displacement | StampField::TicketType => return None,
        };
        Some(slot)
    }

    /// (フィールド, 値) を出力順に列挙
    pub fn entries(&self) -> impl Iterator<Item = (StampField, &str)> + '_ {
        StampField::ALL.iter().map(move |&field| (field, self.get(field)))
    }
}
