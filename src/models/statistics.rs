use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Figures shown on the dashboard, always over the whole table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub total: u64,
    pub pendentes: u64,
    pub concluidas: u64,
    pub canceladas: u64,
    pub valor_total: f64,
    pub valor_pendente: f64,
}

/// Body of `GET /api/estatisticas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatisticsResponse {
    pub total: u64,
    pub pendentes: u64,
    pub concluidas: u64,
    pub valor_total: f64,
}

impl From<DashboardStats> for StatisticsResponse {
    fn from(stats: DashboardStats) -> Self {
        StatisticsResponse {
            total: stats.total,
            pendentes: stats.pendentes,
            concluidas: stats.concluidas,
            valor_total: stats.valor_total,
        }
    }
}
