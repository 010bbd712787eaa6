#![allow(dead_code)]

use am_licita::models::OrderForm;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory database with the schema applied.
/// A single connection keeps every query on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    db
}

pub fn order_form(cliente: &str, itens_json: &str) -> OrderForm {
    OrderForm {
        cliente: cliente.to_string(),
        endereco: Some("Rua das Flores, 10".to_string()),
        cidade: Some("Recife".to_string()),
        telefone: Some("(81) 99999-0000".to_string()),
        cpf_cnpj: Some("12.345.678/0001-90".to_string()),
        email: Some("contato@example.com".to_string()),
        observacoes: None,
        itens_json: Some(itens_json.to_string()),
    }
}

pub const TWO_ITEMS: &str = r#"[
    {"descricao": "A", "quantidade": 2, "valor_unitario": 10},
    {"descricao": "B", "quantidade": 1, "valor_unitario": 5}
]"#;
