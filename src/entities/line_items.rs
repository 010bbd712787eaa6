use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One billable line of a service order.
/// `valor_total` is stored as `quantidade * valor_unitario` when the order is saved.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "itens_ordem")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ordem_id: i32,
    pub descricao: String,
    pub quantidade: f64,
    pub valor_unitario: f64,
    pub valor_total: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrdemId",
        to = "super::orders::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Order,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
