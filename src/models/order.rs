use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::entities::{OrderStatus, line_item_entity, order_entity};
use crate::error::{AppError, AppResult};

const INVALID_ITEMS: &str = "Itens da ordem inválidos";

/// Order header and items as submitted by the order form
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OrderForm {
    #[serde(default)]
    pub cliente: String,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
    pub telefone: Option<String>,
    pub cpf_cnpj: Option<String>,
    pub email: Option<String>,
    pub observacoes: Option<String>,
    /// JSON array of `{descricao, quantidade, valor_unitario}`
    pub itens_json: Option<String>,
}

/// Validated order input, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderInput {
    pub cliente: String,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
    pub telefone: Option<String>,
    pub cpf_cnpj: Option<String>,
    pub email: Option<String>,
    pub observacoes: Option<String>,
    pub items: Vec<NewLineItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLineItem {
    pub descricao: String,
    pub quantidade: f64,
    pub valor_unitario: f64,
}

impl NewLineItem {
    pub fn total(&self) -> f64 {
        self.quantidade * self.valor_unitario
    }
}

impl OrderInput {
    /// Grand total of the order, the sum of every item total.
    pub fn total(&self) -> f64 {
        self.items.iter().map(NewLineItem::total).sum()
    }
}

impl TryFrom<OrderForm> for OrderInput {
    type Error = AppError;

    fn try_from(form: OrderForm) -> AppResult<Self> {
        let cliente = form.cliente.trim().to_string();
        if cliente.is_empty() {
            return Err(AppError::ValidationError(
                "Nome do cliente é obrigatório".to_string(),
            ));
        }

        let items = parse_items(form.itens_json.as_deref())?;

        let total: f64 = items.iter().map(NewLineItem::total).sum();
        if !total.is_finite() {
            log::warn!("Order total is not a finite number: {total}");
            return Err(AppError::ValidationError(INVALID_ITEMS.to_string()));
        }

        Ok(OrderInput {
            cliente,
            endereco: non_blank(form.endereco),
            cidade: non_blank(form.cidade),
            telefone: non_blank(form.telefone),
            cpf_cnpj: non_blank(form.cpf_cnpj),
            email: non_blank(form.email),
            observacoes: non_blank(form.observacoes),
            items,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses the `itens_json` form field. Missing or blank means no items.
///
/// Quantity and unit price may be JSON numbers or numeric strings. Any
/// malformed entry rejects the whole list with one generic message.
pub fn parse_items(raw: Option<&str>) -> AppResult<Vec<NewLineItem>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(Vec::new()),
        Some(raw) => raw,
    };

    let value: Value = serde_json::from_str(raw).map_err(|e| {
        log::warn!("itens_json is not valid JSON: {e}");
        AppError::ValidationError(INVALID_ITEMS.to_string())
    })?;

    let Value::Array(entries) = value else {
        log::warn!("itens_json is not an array");
        return Err(AppError::ValidationError(INVALID_ITEMS.to_string()));
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            parse_item(entry).ok_or_else(|| {
                log::warn!("Rejected line item #{index}: {entry}");
                AppError::ValidationError(INVALID_ITEMS.to_string())
            })
        })
        .collect()
}

fn parse_item(entry: &Value) -> Option<NewLineItem> {
    let descricao = entry.get("descricao")?.as_str()?.trim();
    if descricao.is_empty() {
        return None;
    }

    let item = NewLineItem {
        descricao: descricao.to_string(),
        quantidade: parse_number(entry.get("quantidade")?)?,
        valor_unitario: parse_number(entry.get("valor_unitario")?)?,
    };
    item.total().is_finite().then_some(item)
}

fn parse_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Status change form (`POST /ordem/{id}/status`)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StatusForm {
    pub status: Option<String>,
}

/// Dashboard query string
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Substring of the client name or order number
    pub busca: Option<String>,
    /// pendente | concluida | cancelada
    pub status: Option<String>,
}

/// Filters applied to the order list, combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
}

impl TryFrom<&DashboardQuery> for OrderFilter {
    type Error = AppError;

    fn try_from(query: &DashboardQuery) -> AppResult<Self> {
        let status = match query.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(s.parse::<OrderStatus>()?),
        };

        Ok(OrderFilter {
            search: non_blank(query.busca.clone()),
            status,
        })
    }
}

/// An order together with its items, in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    pub order: order_entity::Model,
    pub items: Vec<line_item_entity::Model>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items_numbers_and_strings() {
        let items = parse_items(Some(
            r#"[{"descricao":"A","quantidade":2,"valor_unitario":10},
                {"descricao":"B","quantidade":"1","valor_unitario":"5.5"}]"#,
        ))
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].total(), 20.0);
        assert_eq!(items[1].quantidade, 1.0);
        assert_eq!(items[1].valor_unitario, 5.5);
    }

    #[test]
    fn test_parse_items_missing_or_blank_is_empty() {
        assert!(parse_items(None).unwrap().is_empty());
        assert!(parse_items(Some("  ")).unwrap().is_empty());
        assert!(parse_items(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_items_rejects_malformed_input() {
        let cases = [
            "not json",
            r#"{"descricao":"A"}"#,
            r#"["A"]"#,
            r#"[{"quantidade":1,"valor_unitario":1}]"#,
            r#"[{"descricao":"  ","quantidade":1,"valor_unitario":1}]"#,
            r#"[{"descricao":"A","quantidade":"dois","valor_unitario":1}]"#,
            r#"[{"descricao":"A","quantidade":1,"valor_unitario":null}]"#,
            r#"[{"descricao":"A","quantidade":1}]"#,
            r#"[{"descricao":"A","quantidade":"inf","valor_unitario":1}]"#,
            r#"[{"descricao":"A","quantidade":1e200,"valor_unitario":1e200}]"#,
        ];

        for case in cases {
            match parse_items(Some(case)) {
                Err(AppError::ValidationError(msg)) => assert_eq!(msg, INVALID_ITEMS),
                other => panic!("expected validation error for {case}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_order_input_total() {
        let form = OrderForm {
            cliente: "  Acme Ltda ".to_string(),
            email: Some("".to_string()),
            cidade: Some(" Recife ".to_string()),
            itens_json: Some(
                r#"[{"descricao":"A","quantidade":2,"valor_unitario":10},
                    {"descricao":"B","quantidade":1,"valor_unitario":5}]"#
                    .to_string(),
            ),
            ..Default::default()
        };

        let input = OrderInput::try_from(form).unwrap();
        assert_eq!(input.cliente, "Acme Ltda");
        assert_eq!(input.email, None);
        assert_eq!(input.cidade.as_deref(), Some("Recife"));
        assert_eq!(input.total(), 25.0);
    }

    #[test]
    fn test_order_input_rejects_non_finite_total() {
        let form = OrderForm {
            cliente: "Acme".to_string(),
            itens_json: Some(
                r#"[{"descricao":"A","quantidade":1e300,"valor_unitario":1e10},
                    {"descricao":"B","quantidade":-1e300,"valor_unitario":1e10}]"#
                    .to_string(),
            ),
            ..Default::default()
        };
        match OrderInput::try_from(form) {
            Err(AppError::ValidationError(msg)) => assert_eq!(msg, INVALID_ITEMS),
            other => panic!("expected validation error, got {other:?}"),
        }

        let overflowing_sum = OrderForm {
            cliente: "Acme".to_string(),
            itens_json: Some(
                r#"[{"descricao":"A","quantidade":1e300,"valor_unitario":1e8},
                    {"descricao":"B","quantidade":1e300,"valor_unitario":1e8}]"#
                    .to_string(),
            ),
            ..Default::default()
        };
        assert!(matches!(
            OrderInput::try_from(overflowing_sum),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_order_input_requires_client() {
        let form = OrderForm {
            cliente: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            OrderInput::try_from(form),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_order_filter_from_query() {
        let filter = OrderFilter::try_from(&DashboardQuery {
            busca: Some(" Acme ".to_string()),
            status: Some("pendente".to_string()),
        })
        .unwrap();
        assert_eq!(filter.search.as_deref(), Some("Acme"));
        assert_eq!(filter.status, Some(OrderStatus::Pending));

        let empty = OrderFilter::try_from(&DashboardQuery {
            busca: Some(String::new()),
            status: Some(String::new()),
        })
        .unwrap();
        assert_eq!(empty, OrderFilter::default());

        assert!(
            OrderFilter::try_from(&DashboardQuery {
                busca: None,
                status: Some("aberta".to_string()),
            })
            .is_err()
        );
    }
}
