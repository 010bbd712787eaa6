use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::AppError;

/// Lifecycle of a service order. Any state may be set from any other.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pendente")]
    #[serde(rename = "pendente")]
    Pending,
    #[sea_orm(string_value = "concluida")]
    #[serde(rename = "concluida")]
    Completed,
    #[sea_orm(string_value = "cancelada")]
    #[serde(rename = "cancelada")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pendente",
            OrderStatus::Completed => "concluida",
            OrderStatus::Cancelled => "cancelada",
        }
    }

    /// Label shown in the UI
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendente",
            OrderStatus::Completed => "Concluída",
            OrderStatus::Cancelled => "Cancelada",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendente" => Ok(OrderStatus::Pending),
            "concluida" => Ok(OrderStatus::Completed),
            "cancelada" => Ok(OrderStatus::Cancelled),
            other => Err(AppError::ValidationError(format!("Status inválido: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ordens_servico")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `NN/YY`, sequential within the year
    #[sea_orm(unique)]
    pub numero: String,
    pub cliente: String,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
    pub telefone: Option<String>,
    pub cpf_cnpj: Option<String>,
    pub email: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub data_conclusao: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub observacoes: Option<String>,
    /// Sum of the item totals as of the last save
    pub valor_total: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::line_items::Entity")]
    LineItems,
}

impl Related<super::line_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
