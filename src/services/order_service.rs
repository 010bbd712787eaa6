use crate::entities::{OrderStatus, line_item_entity as line_items, order_entity as orders};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::order_number::{current_year_suffix, next_order_number};
use chrono::Utc;
use sea_orm::sea_query::{BinOper, Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, FromQueryResult, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Dashboard list: search and status filters combined with AND, newest first.
    pub async fn list_orders(&self, filter: &OrderFilter) -> AppResult<Vec<orders::Model>> {
        let mut query = orders::Entity::find();

        if let Some(search) = &filter.search {
            let pattern = contains_pattern(search);
            query = query.filter(
                Condition::any()
                    .add(lower_contains(orders::Column::Cliente, &pattern))
                    .add(lower_contains(orders::Column::Numero, &pattern)),
            );
        }

        if let Some(status) = filter.status {
            query = query.filter(orders::Column::Status.eq(status));
        }

        let list = query
            .order_by_desc(orders::Column::DataCriacao)
            .order_by_desc(orders::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list)
    }

    /// Counts and sums over the whole table, independent of any list filter.
    pub async fn statistics(&self) -> AppResult<DashboardStats> {
        Ok(DashboardStats {
            total: orders::Entity::find().count(&self.pool).await?,
            pendentes: self.count_with_status(OrderStatus::Pending).await?,
            concluidas: self.count_with_status(OrderStatus::Completed).await?,
            canceladas: self.count_with_status(OrderStatus::Cancelled).await?,
            valor_total: self.sum_valor_total(None).await?,
            valor_pendente: self.sum_valor_total(Some(OrderStatus::Pending)).await?,
        })
    }

    pub async fn find_order(&self, id: i32) -> AppResult<orders::Model> {
        orders::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Order with its items in insertion order.
    pub async fn get_order(&self, id: i32) -> AppResult<OrderDetail> {
        let order = self.find_order(id).await?;
        let items = order
            .find_related(line_items::Entity)
            .order_by_asc(line_items::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(OrderDetail { order, items })
    }

    /// Creates a pending order numbered for the current year.
    pub async fn create_order(&self, form: OrderForm) -> AppResult<orders::Model> {
        self.create_order_in_year(form, &current_year_suffix()).await
    }

    /// Creates a pending order numbered within the two-digit `year`.
    ///
    /// Number lookup, order insert and item inserts share one transaction;
    /// any failure leaves the database untouched.
    pub async fn create_order_in_year(
        &self,
        form: OrderForm,
        year: &str,
    ) -> AppResult<orders::Model> {
        let input = OrderInput::try_from(form)?;

        let txn = self.pool.begin().await?;

        let numero = generate_order_number(&txn, year).await?;

        let order = orders::ActiveModel {
            numero: Set(numero),
            cliente: Set(input.cliente.clone()),
            endereco: Set(input.endereco.clone()),
            cidade: Set(input.cidade.clone()),
            telefone: Set(input.telefone.clone()),
            cpf_cnpj: Set(input.cpf_cnpj.clone()),
            email: Set(input.email.clone()),
            data_criacao: Set(Utc::now()),
            data_conclusao: Set(None),
            status: Set(OrderStatus::Pending),
            observacoes: Set(input.observacoes.clone()),
            valor_total: Set(input.total()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        insert_items(&txn, order.id, &input.items).await?;

        txn.commit().await?;

        log::info!(
            "Created service order {} (id {}) with {} items, total {:.2}",
            order.numero,
            order.id,
            input.items.len(),
            order.valor_total
        );
        Ok(order)
    }

    /// Overwrites the header fields and replaces the whole item set.
    /// Number, status and timestamps are kept.
    pub async fn update_order(&self, id: i32, form: OrderForm) -> AppResult<orders::Model> {
        let txn = self.pool.begin().await?;

        let existing = orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| not_found(id))?;

        let input = OrderInput::try_from(form)?;

        line_items::Entity::delete_many()
            .filter(line_items::Column::OrdemId.eq(id))
            .exec(&txn)
            .await?;
        insert_items(&txn, id, &input.items).await?;

        let mut am = existing.into_active_model();
        am.cliente = Set(input.cliente.clone());
        am.endereco = Set(input.endereco.clone());
        am.cidade = Set(input.cidade.clone());
        am.telefone = Set(input.telefone.clone());
        am.cpf_cnpj = Set(input.cpf_cnpj.clone());
        am.email = Set(input.email.clone());
        am.observacoes = Set(input.observacoes.clone());
        am.valor_total = Set(input.total());
        let updated = am.update(&txn).await?;

        txn.commit().await?;

        log::info!(
            "Updated service order {} (id {}) with {} items, total {:.2}",
            updated.numero,
            updated.id,
            input.items.len(),
            updated.valor_total
        );
        Ok(updated)
    }

    /// Sets the status. Completing stamps `data_conclusao`; other transitions
    /// leave a previous completion date in place.
    pub async fn change_status(&self, id: i32, status: OrderStatus) -> AppResult<orders::Model> {
        let txn = self.pool.begin().await?;

        let order = orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut am = order.into_active_model();
        am.status = Set(status);
        if status == OrderStatus::Completed {
            am.data_conclusao = Set(Some(Utc::now()));
        }
        let updated = am.update(&txn).await?;

        txn.commit().await?;

        log::info!("Service order {} status set to {}", updated.numero, status);
        Ok(updated)
    }

    /// Deletes the order and its items, returning the deleted order number.
    pub async fn delete_order(&self, id: i32) -> AppResult<String> {
        let txn = self.pool.begin().await?;

        let order = orders::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| not_found(id))?;
        let numero = order.numero.clone();

        line_items::Entity::delete_many()
            .filter(line_items::Column::OrdemId.eq(id))
            .exec(&txn)
            .await?;
        order.delete(&txn).await?;

        txn.commit().await?;

        log::info!("Deleted service order {numero} (id {id})");
        Ok(numero)
    }

    async fn count_with_status(&self, status: OrderStatus) -> AppResult<u64> {
        let count = orders::Entity::find()
            .filter(orders::Column::Status.eq(status))
            .count(&self.pool)
            .await?;
        Ok(count)
    }

    async fn sum_valor_total(&self, status: Option<OrderStatus>) -> AppResult<f64> {
        #[derive(Debug, FromQueryResult)]
        struct SumRow {
            total: Option<f64>,
        }

        let mut query = orders::Entity::find()
            .select_only()
            .column_as(Expr::col(orders::Column::ValorTotal).sum(), "total");
        if let Some(status) = status {
            query = query.filter(orders::Column::Status.eq(status));
        }

        let total = query
            .into_model::<SumRow>()
            .one(&self.pool)
            .await?
            .and_then(|row| row.total)
            .unwrap_or(0.0);
        Ok(total)
    }
}

const LIKE_ESCAPE: char = '\\';

/// `%term%` with the LIKE wildcards in `term` escaped, so they match literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `lower(column) LIKE lower(pattern) ESCAPE '\'`.
///
/// Both sides go through the same SQL `lower`, so they fold identically
/// even where SQLite only folds ASCII letters.
fn lower_contains(column: orders::Column, pattern: &str) -> SimpleExpr {
    let pattern = SimpleExpr::Binary(
        Box::new(Func::lower(Expr::val(pattern)).into()),
        BinOper::Escape,
        Box::new(SimpleExpr::Constant(LIKE_ESCAPE.into())),
    );
    Expr::expr(Func::lower(Expr::col(column))).binary(BinOper::Like, pattern)
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Ordem de serviço {id} não encontrada"))
}

/// Next `NN/YY` number, read inside the caller's transaction.
async fn generate_order_number<C>(db: &C, year: &str) -> Result<String, DbErr>
where
    C: ConnectionTrait,
{
    let existing: Vec<String> = orders::Entity::find()
        .select_only()
        .column(orders::Column::Numero)
        .filter(orders::Column::Numero.like(format!("%/{year}")))
        .into_tuple()
        .all(db)
        .await?;

    Ok(next_order_number(existing.iter().map(String::as_str), year))
}

async fn insert_items(
    txn: &DatabaseTransaction,
    order_id: i32,
    items: &[NewLineItem],
) -> Result<(), DbErr> {
    for item in items {
        line_items::ActiveModel {
            ordem_id: Set(order_id),
            descricao: Set(item.descricao.clone()),
            quantidade: Set(item.quantidade),
            valor_unitario: Set(item.valor_unitario),
            valor_total: Set(item.total()),
            ..Default::default()
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}
