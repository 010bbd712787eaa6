use super::format::{format_currency, format_datetime, format_quantity, html_escape};
use super::layout;
use crate::entities::{OrderStatus, line_item_entity};
use crate::models::OrderDetail;
use crate::utils::flash::FlashMessage;
use sea_orm::Iterable;

pub fn render_order_view(detail: &OrderDetail, flash: Option<&FlashMessage>) -> String {
    let order = &detail.order;
    let opt = |value: &Option<String>| html_escape(value.as_deref().unwrap_or("-"));

    let status_options: String = OrderStatus::iter()
        .map(|s| {
            let selected = if s == order.status { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                s.as_str(),
                selected,
                s.label()
            )
        })
        .collect();

    let conclusao = order
        .data_conclusao
        .as_ref()
        .map(format_datetime)
        .unwrap_or_else(|| "-".to_string());

    let title = format!("Ordem de Serviço {}", order.numero);
    let body = format!(
        r#"<h1>{title} <span class="badge badge-{status}">{status_label}</span></h1>
<p>
    <a href="/ordem/{id}/editar" class="btn">Editar</a>
    <a href="/ordem/{id}/imprimir" class="btn" target="_blank">Imprimir</a>
    <form method="post" action="/ordem/{id}/excluir" class="inline" onsubmit="return confirm('Excluir esta ordem?');">
        <button type="submit" class="btn btn-danger">Excluir</button>
    </form>
</p>
<table>
    <tr><th>Cliente</th><td>{cliente}</td></tr>
    <tr><th>CPF/CNPJ</th><td>{cpf_cnpj}</td></tr>
    <tr><th>Endereço</th><td>{endereco}</td></tr>
    <tr><th>Cidade</th><td>{cidade}</td></tr>
    <tr><th>Telefone</th><td>{telefone}</td></tr>
    <tr><th>E-mail</th><td>{email}</td></tr>
    <tr><th>Criada em</th><td>{criacao}</td></tr>
    <tr><th>Concluída em</th><td>{conclusao}</td></tr>
</table>
<h2>Itens</h2>
{items}
<h2>Observações</h2>
<p>{observacoes}</p>
<form method="post" action="/ordem/{id}/status">
    <label>Alterar status
        <select name="status">{status_options}</select>
    </label>
    <button type="submit" class="btn">Atualizar status</button>
</form>"#,
        title = html_escape(&title),
        status = order.status.as_str(),
        status_label = order.status.label(),
        id = order.id,
        cliente = html_escape(&order.cliente),
        cpf_cnpj = opt(&order.cpf_cnpj),
        endereco = opt(&order.endereco),
        cidade = opt(&order.cidade),
        telefone = opt(&order.telefone),
        email = opt(&order.email),
        criacao = format_datetime(&order.data_criacao),
        conclusao = conclusao,
        items = render_items_table(&detail.items, order.valor_total),
        observacoes = opt(&order.observacoes),
        status_options = status_options,
    );

    layout(&title, flash, &body)
}

/// Item table shared with the print view.
pub fn render_items_table(items: &[line_item_entity::Model], total: f64) -> String {
    let rows: String = if items.is_empty() {
        r#"<tr><td colspan="4">Nenhum item.</td></tr>"#.to_string()
    } else {
        items
            .iter()
            .map(|item| {
                format!(
                    r#"<tr><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td></tr>"#,
                    html_escape(&item.descricao),
                    format_quantity(item.quantidade),
                    format_currency(item.valor_unitario),
                    format_currency(item.valor_total),
                )
            })
            .collect()
    };

    format!(
        r#"<table class="items">
    <thead><tr><th>Descrição</th><th class="num">Qtd.</th><th class="num">Valor unitário</th><th class="num">Total</th></tr></thead>
    <tbody>{rows}</tbody>
    <tfoot><tr><th colspan="3">Total</th><th class="num">{total}</th></tr></tfoot>
</table>"#,
        rows = rows,
        total = format_currency(total),
    )
}
