use super::format::{format_currency, format_datetime, html_escape};
use super::layout;
use crate::entities::{OrderStatus, order_entity};
use crate::models::{DashboardQuery, DashboardStats};
use crate::utils::flash::FlashMessage;
use sea_orm::Iterable;

pub fn render_dashboard(
    orders: &[order_entity::Model],
    stats: &DashboardStats,
    query: &DashboardQuery,
    flash: Option<&FlashMessage>,
) -> String {
    let busca = query.busca.as_deref().unwrap_or("");
    let status_filter = query.status.as_deref().unwrap_or("");

    let status_options: String = OrderStatus::iter()
        .map(|s| {
            let selected = if s.as_str() == status_filter { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                s.as_str(),
                selected,
                s.label()
            )
        })
        .collect();

    let rows: String = if orders.is_empty() {
        r#"<tr><td colspan="5">Nenhuma ordem encontrada.</td></tr>"#.to_string()
    } else {
        orders.iter().map(render_row).collect()
    };

    let body = format!(
        r#"<section class="stats">
    <div class="stat">Total<strong>{total}</strong></div>
    <div class="stat">Pendentes<strong>{pendentes}</strong></div>
    <div class="stat">Concluídas<strong>{concluidas}</strong></div>
    <div class="stat">Canceladas<strong>{canceladas}</strong></div>
    <div class="stat">Valor total<strong>{valor_total}</strong></div>
    <div class="stat">Valor pendente<strong>{valor_pendente}</strong></div>
</section>
<form method="get" action="/" class="search">
    <input type="text" name="busca" value="{busca}" placeholder="Cliente ou número">
    <select name="status">
        <option value="">Todos os status</option>
        {status_options}
    </select>
    <button type="submit" class="btn">Filtrar</button>
</form>
<table>
    <thead>
        <tr><th>Número</th><th>Cliente</th><th>Data</th><th>Status</th><th class="num">Valor</th></tr>
    </thead>
    <tbody>
        {rows}
    </tbody>
</table>"#,
        total = stats.total,
        pendentes = stats.pendentes,
        concluidas = stats.concluidas,
        canceladas = stats.canceladas,
        valor_total = format_currency(stats.valor_total),
        valor_pendente = format_currency(stats.valor_pendente),
        busca = html_escape(busca),
        status_options = status_options,
        rows = rows,
    );

    layout("Ordens de Serviço", flash, &body)
}

fn render_row(order: &order_entity::Model) -> String {
    format!(
        r#"<tr>
    <td><a href="/ordem/{id}">{numero}</a></td>
    <td>{cliente}</td>
    <td>{data}</td>
    <td><span class="badge badge-{status}">{label}</span></td>
    <td class="num">{valor}</td>
</tr>"#,
        id = order.id,
        numero = html_escape(&order.numero),
        cliente = html_escape(&order.cliente),
        data = format_datetime(&order.data_criacao),
        status = order.status.as_str(),
        label = order.status.label(),
        valor = format_currency(order.valor_total),
    )
}
