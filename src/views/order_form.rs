use super::format::html_escape;
use super::layout;
use crate::models::OrderDetail;
use crate::utils::flash::FlashMessage;
use serde_json::json;

/// Create form when `existing` is `None`, edit form otherwise.
pub fn render_order_form(existing: Option<&OrderDetail>, flash: Option<&FlashMessage>) -> String {
    let (title, action) = match existing {
        Some(detail) => (
            format!("Editar Ordem {}", detail.order.numero),
            format!("/ordem/{}/editar", detail.order.id),
        ),
        None => ("Nova Ordem de Serviço".to_string(), "/ordem/nova".to_string()),
    };

    let order = existing.map(|d| &d.order);
    let field = |value: Option<&str>| html_escape(value.unwrap_or(""));

    let items_json = existing
        .map(|d| {
            d.items
                .iter()
                .map(|item| {
                    json!({
                        "descricao": item.descricao,
                        "quantidade": item.quantidade,
                        "valor_unitario": item.valor_unitario,
                    })
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    let items_json = serde_json::Value::Array(items_json).to_string();

    let body = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}" id="order-form">
    <fieldset>
        <legend>Cliente</legend>
        <label>Nome / Razão social <input type="text" name="cliente" required maxlength="200" value="{cliente}"></label>
        <label>CPF/CNPJ <input type="text" name="cpf_cnpj" maxlength="20" value="{cpf_cnpj}"></label>
        <label>Endereço <input type="text" name="endereco" maxlength="300" value="{endereco}"></label>
        <label>Cidade <input type="text" name="cidade" maxlength="100" value="{cidade}"></label>
        <label>Telefone <input type="text" name="telefone" maxlength="20" value="{telefone}"></label>
        <label>E-mail <input type="email" name="email" maxlength="100" value="{email}"></label>
    </fieldset>
    <fieldset>
        <legend>Itens</legend>
        <table id="items" data-items="{items_json}">
            <thead><tr><th>Descrição</th><th>Qtd.</th><th>Valor unitário</th><th></th></tr></thead>
            <tbody></tbody>
        </table>
        <button type="button" class="btn" id="add-item">Adicionar item</button>
        <p>Total: <strong id="order-total">0,00</strong></p>
    </fieldset>
    <fieldset>
        <legend>Observações</legend>
        <textarea name="observacoes" rows="4">{observacoes}</textarea>
    </fieldset>
    <input type="hidden" name="itens_json" id="itens_json">
    <button type="submit" class="btn">Salvar</button>
</form>
<script>{script}</script>"#,
        title = html_escape(&title),
        action = action,
        cliente = field(order.map(|o| o.cliente.as_str())),
        cpf_cnpj = field(order.and_then(|o| o.cpf_cnpj.as_deref())),
        endereco = field(order.and_then(|o| o.endereco.as_deref())),
        cidade = field(order.and_then(|o| o.cidade.as_deref())),
        telefone = field(order.and_then(|o| o.telefone.as_deref())),
        email = field(order.and_then(|o| o.email.as_deref())),
        observacoes = field(order.and_then(|o| o.observacoes.as_deref())),
        items_json = html_escape(&items_json),
        script = ITEMS_SCRIPT,
    );

    layout(&title, flash, &body)
}

// Keeps the item rows and the hidden itens_json field in sync.
const ITEMS_SCRIPT: &str = r#"
(function () {
    var table = document.getElementById('items');
    var tbody = table.querySelector('tbody');
    function addRow(item) {
        item = item || { descricao: '', quantidade: 1, valor_unitario: 0 };
        var tr = document.createElement('tr');
        tr.innerHTML = '<td><input class="descricao" required></td>' +
            '<td><input class="quantidade" type="number" step="any" min="0"></td>' +
            '<td><input class="valor_unitario" type="number" step="0.01" min="0"></td>' +
            '<td><button type="button" class="btn btn-danger remove">x</button></td>';
        tr.querySelector('.descricao').value = item.descricao;
        tr.querySelector('.quantidade').value = item.quantidade;
        tr.querySelector('.valor_unitario').value = item.valor_unitario;
        tr.querySelector('.remove').onclick = function () { tr.remove(); refresh(); };
        tr.oninput = refresh;
        tbody.appendChild(tr);
    }
    function collect() {
        return Array.prototype.map.call(tbody.rows, function (tr) {
            return {
                descricao: tr.querySelector('.descricao').value,
                quantidade: tr.querySelector('.quantidade').value,
                valor_unitario: tr.querySelector('.valor_unitario').value
            };
        });
    }
    function refresh() {
        var total = collect().reduce(function (acc, i) {
            return acc + (parseFloat(i.quantidade) || 0) * (parseFloat(i.valor_unitario) || 0);
        }, 0);
        document.getElementById('order-total').textContent = total.toFixed(2).replace('.', ',');
    }
    JSON.parse(table.dataset.items).forEach(addRow);
    document.getElementById('add-item').onclick = function () { addRow(); };
    document.getElementById('order-form').onsubmit = function () {
        document.getElementById('itens_json').value = JSON.stringify(collect());
    };
    refresh();
})();
"#;
