use super::format::{format_datetime, html_escape};
use super::order_view::render_items_table;
use crate::models::OrderDetail;

/// Standalone printable page, without the app layout.
pub fn render_print(detail: &OrderDetail) -> String {
    let order = &detail.order;
    let opt = |value: &Option<String>| html_escape(value.as_deref().unwrap_or(""));

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="utf-8">
    <title>Ordem de Serviço {numero}</title>
    <style>{style}</style>
</head>
<body>
    <h1>Ordem de Serviço Nº {numero}</h1>
    <p class="meta">Data: {criacao} &middot; Status: {status}</p>
    <section>
        <p><strong>Cliente:</strong> {cliente}</p>
        <p><strong>CPF/CNPJ:</strong> {cpf_cnpj}</p>
        <p><strong>Endereço:</strong> {endereco} {cidade}</p>
        <p><strong>Telefone:</strong> {telefone} <strong>E-mail:</strong> {email}</p>
    </section>
    {items}
    <section>
        <p><strong>Observações:</strong></p>
        <p>{observacoes}</p>
    </section>
    <div class="signature">Assinatura do cliente</div>
    <button class="no-print" onclick="window.print()">Imprimir</button>
</body>
</html>"#,
        style = PRINT_STYLE,
        numero = html_escape(&order.numero),
        criacao = format_datetime(&order.data_criacao),
        status = order.status.label(),
        cliente = html_escape(&order.cliente),
        cpf_cnpj = opt(&order.cpf_cnpj),
        endereco = opt(&order.endereco),
        cidade = opt(&order.cidade),
        telefone = opt(&order.telefone),
        email = opt(&order.email),
        items = render_items_table(&detail.items, order.valor_total),
        observacoes = opt(&order.observacoes),
    )
}

const PRINT_STYLE: &str = r#"
body { font-family: serif; margin: 24px; }
table { width: 100%; border-collapse: collapse; margin: 16px 0; }
th, td { border: 1px solid #444; padding: 4px 8px; text-align: left; }
.num { text-align: right; }
.signature { margin-top: 64px; border-top: 1px solid #000; width: 300px; text-align: center; }
@media print { .no-print { display: none; } }
"#;
