mod common;

use am_licita::entities::{OrderStatus, line_item_entity, order_entity};
use am_licita::error::AppError;
use am_licita::models::{OrderFilter, OrderForm};
use am_licita::services::OrderService;
use common::{TWO_ITEMS, order_form, setup_db};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[tokio::test]
async fn test_create_order_computes_totals() {
    let db = setup_db().await;
    let service = OrderService::new(db.clone());

    let order = service
        .create_order_in_year(order_form("Acme Ltda", TWO_ITEMS), "24")
        .await
        .unwrap();

    assert_eq!(order.numero, "01/24");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.valor_total, 25.0);
    assert!(order.data_conclusao.is_none());

    let detail = service.get_order(order.id).await.unwrap();
    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.items[0].descricao, "A");
    assert_eq!(detail.items[0].valor_total, 20.0);
    assert_eq!(detail.items[1].descricao, "B");
    assert_eq!(detail.items[1].valor_total, 5.0);
    let sum: f64 = detail.items.iter().map(|i| i.valor_total).sum();
    assert_eq!(sum, detail.order.valor_total);
}

#[tokio::test]
async fn test_order_numbers_increase_within_year() {
    let db = setup_db().await;
    let service = OrderService::new(db);

    let mut numbers = Vec::new();
    for i in 0..3 {
        let order = service
            .create_order_in_year(order_form(&format!("Cliente {i}"), "[]"), "24")
            .await
            .unwrap();
        numbers.push(order.numero);
    }
    assert_eq!(numbers, vec!["01/24", "02/24", "03/24"]);

    // a new year starts over
    let next_year = service
        .create_order_in_year(order_form("Cliente novo", "[]"), "25")
        .await
        .unwrap();
    assert_eq!(next_year.numero, "01/25");

    let back = service
        .create_order_in_year(order_form("Cliente antigo", "[]"), "24")
        .await
        .unwrap();
    assert_eq!(back.numero, "04/24");
}

#[tokio::test]
async fn test_numbering_uses_highest_sequence_not_latest_row() {
    let db = setup_db().await;
    let service = OrderService::new(db.clone());

    let first = service
        .create_order_in_year(order_form("A", "[]"), "24")
        .await
        .unwrap();
    service
        .create_order_in_year(order_form("B", "[]"), "24")
        .await
        .unwrap();
    // numbers freed by deletion are not reused
    service.delete_order(first.id).await.unwrap();

    let next = service
        .create_order_in_year(order_form("C", "[]"), "24")
        .await
        .unwrap();
    assert_eq!(next.numero, "03/24");
}

#[tokio::test]
async fn test_create_with_invalid_items_writes_nothing() {
    let db = setup_db().await;
    let service = OrderService::new(db.clone());

    let result = service
        .create_order_in_year(
            order_form(
                "Acme",
                r#"[{"descricao":"A","quantidade":1,"valor_unitario":1},
                    {"descricao":"B","quantidade":"x","valor_unitario":1}]"#,
            ),
            "24",
        )
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
    assert_eq!(order_entity::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(line_item_entity::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_requires_client_name() {
    let db = setup_db().await;
    let service = OrderService::new(db);

    let result = service
        .create_order_in_year(order_form("  ", TWO_ITEMS), "24")
        .await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn test_update_replaces_items() {
    let db = setup_db().await;
    let service = OrderService::new(db.clone());

    let order = service
        .create_order_in_year(order_form("Acme", TWO_ITEMS), "24")
        .await
        .unwrap();

    let updated = service
        .update_order(
            order.id,
            order_form(
                "Acme Serviços",
                r#"[{"descricao":"C","quantidade":"3","valor_unitario":"1.5"}]"#,
            ),
        )
        .await
        .unwrap();

    assert_eq!(updated.numero, order.numero);
    assert_eq!(updated.cliente, "Acme Serviços");
    assert_eq!(updated.valor_total, 4.5);
    assert_eq!(updated.data_criacao, order.data_criacao);

    let detail = service.get_order(order.id).await.unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].descricao, "C");
    assert_eq!(line_item_entity::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_with_empty_items_zeroes_total() {
    let db = setup_db().await;
    let service = OrderService::new(db.clone());

    let order = service
        .create_order_in_year(order_form("Acme", TWO_ITEMS), "24")
        .await
        .unwrap();

    let updated = service
        .update_order(order.id, order_form("Acme", "[]"))
        .await
        .unwrap();

    assert_eq!(updated.valor_total, 0.0);
    let remaining = line_item_entity::Entity::find()
        .filter(line_item_entity::Column::OrdemId.eq(order.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_failed_update_keeps_previous_state() {
    let db = setup_db().await;
    let service = OrderService::new(db.clone());

    let order = service
        .create_order_in_year(order_form("Acme", TWO_ITEMS), "24")
        .await
        .unwrap();

    let result = service
        .update_order(order.id, order_form("Outro", "{not json"))
        .await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));

    let detail = service.get_order(order.id).await.unwrap();
    assert_eq!(detail.order.cliente, "Acme");
    assert_eq!(detail.order.valor_total, 25.0);
    assert_eq!(detail.items.len(), 2);
}

#[tokio::test]
async fn test_update_unknown_order() {
    let db = setup_db().await;
    let service = OrderService::new(db);

    let result = service.update_order(42, order_form("Acme", "[]")).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_status_transitions_keep_completion_date() {
    let db = setup_db().await;
    let service = OrderService::new(db);

    let order = service
        .create_order_in_year(order_form("Acme", TWO_ITEMS), "24")
        .await
        .unwrap();

    let completed = service
        .change_status(order.id, OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);
    let completed_at = completed.data_conclusao.expect("completion date is set");

    let reopened = service
        .change_status(order.id, OrderStatus::Pending)
        .await
        .unwrap();
    assert_eq!(reopened.status, OrderStatus::Pending);
    assert_eq!(reopened.data_conclusao, Some(completed_at));

    let cancelled = service
        .change_status(order.id, OrderStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(cancelled.data_conclusao, Some(completed_at));
}

#[tokio::test]
async fn test_cancel_does_not_stamp_completion() {
    let db = setup_db().await;
    let service = OrderService::new(db);

    let order = service
        .create_order_in_year(order_form("Acme", "[]"), "24")
        .await
        .unwrap();
    let cancelled = service
        .change_status(order.id, OrderStatus::Cancelled)
        .await
        .unwrap();
    assert!(cancelled.data_conclusao.is_none());
}

#[tokio::test]
async fn test_delete_removes_items() {
    let db = setup_db().await;
    let service = OrderService::new(db.clone());

    let keep = service
        .create_order_in_year(order_form("Fica", TWO_ITEMS), "24")
        .await
        .unwrap();
    let gone = service
        .create_order_in_year(order_form("Sai", TWO_ITEMS), "24")
        .await
        .unwrap();

    let numero = service.delete_order(gone.id).await.unwrap();
    assert_eq!(numero, gone.numero);

    assert!(matches!(
        service.get_order(gone.id).await,
        Err(AppError::NotFound(_))
    ));
    let orphans = line_item_entity::Entity::find()
        .filter(line_item_entity::Column::OrdemId.eq(gone.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
    assert_eq!(service.get_order(keep.id).await.unwrap().items.len(), 2);

    assert!(matches!(
        service.delete_order(gone.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_search_and_status_filter() {
    let db = setup_db().await;
    let service = OrderService::new(db);

    let acme = service
        .create_order_in_year(order_form("ACME Ltda", TWO_ITEMS), "24")
        .await
        .unwrap();
    let acme_done = service
        .create_order_in_year(order_form("Oficina acme", "[]"), "24")
        .await
        .unwrap();
    service
        .create_order_in_year(order_form("Beta Comércio", "[]"), "24")
        .await
        .unwrap();
    service
        .change_status(acme_done.id, OrderStatus::Completed)
        .await
        .unwrap();

    let found = service
        .list_orders(&OrderFilter {
            search: Some("Acme".to_string()),
            status: None,
        })
        .await
        .unwrap();
    let mut ids: Vec<i32> = found.iter().map(|o| o.id).collect();
    ids.sort();
    assert_eq!(ids, vec![acme.id, acme_done.id]);

    let pending = service
        .list_orders(&OrderFilter {
            search: Some("acme".to_string()),
            status: Some(OrderStatus::Pending),
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, acme.id);

    // order numbers are searchable too
    let by_number = service
        .list_orders(&OrderFilter {
            search: Some("02/24".to_string()),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(by_number.len(), 1);
    assert_eq!(by_number[0].id, acme_done.id);

    let all = service.list_orders(&OrderFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    // newest first
    assert_eq!(all[0].cliente, "Beta Comércio");
}

#[tokio::test]
async fn test_search_matches_accented_client_names() {
    let db = setup_db().await;
    let service = OrderService::new(db);

    let joao = service
        .create_order_in_year(order_form("JOÃO CONCEIÇÃO", "[]"), "24")
        .await
        .unwrap();
    service
        .create_order_in_year(order_form("Maria Souza", "[]"), "24")
        .await
        .unwrap();

    for term in ["JOÃO", "joÃo", "CONCEIÇÃO", "conceiÇÃo"] {
        let found = service
            .list_orders(&OrderFilter {
                search: Some(term.to_string()),
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1, "search for {term}");
        assert_eq!(found[0].id, joao.id);
    }
}

#[tokio::test]
async fn test_search_wildcards_match_literally() {
    let db = setup_db().await;
    let service = OrderService::new(db);

    let promo = service
        .create_order_in_year(order_form("Loja 50% Off", "[]"), "24")
        .await
        .unwrap();
    service
        .create_order_in_year(order_form("Loja 500 Off", "[]"), "24")
        .await
        .unwrap();

    let by_percent = service
        .list_orders(&OrderFilter {
            search: Some("50%".to_string()),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(by_percent.len(), 1);
    assert_eq!(by_percent[0].id, promo.id);

    let by_underscore = service
        .list_orders(&OrderFilter {
            search: Some("Loja_".to_string()),
            status: None,
        })
        .await
        .unwrap();
    assert!(by_underscore.is_empty());
}

#[tokio::test]
async fn test_create_with_overflowing_totals_writes_nothing() {
    let db = setup_db().await;
    let service = OrderService::new(db.clone());

    let overflowing = [
        r#"[{"descricao": "A", "quantidade": 1e200, "valor_unitario": 1e200}]"#,
        r#"[{"descricao": "A", "quantidade": 1e200, "valor_unitario": 1e200},
            {"descricao": "B", "quantidade": -1e200, "valor_unitario": 1e200}]"#,
    ];
    for itens_json in overflowing {
        let result = service
            .create_order_in_year(order_form("Acme", itens_json), "24")
            .await;
        assert!(
            matches!(result, Err(AppError::ValidationError(_))),
            "{itens_json}: {result:?}"
        );
    }

    assert_eq!(order_entity::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(line_item_entity::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_statistics_ignore_filters() {
    let db = setup_db().await;
    let service = OrderService::new(db);

    let empty = service.statistics().await.unwrap();
    assert_eq!(empty.total, 0);
    assert_eq!(empty.valor_total, 0.0);
    assert_eq!(empty.valor_pendente, 0.0);

    let a = service
        .create_order_in_year(order_form("A", TWO_ITEMS), "24")
        .await
        .unwrap();
    let b = service
        .create_order_in_year(
            order_form(
                "B",
                r#"[{"descricao":"X","quantidade":4,"valor_unitario":2.5}]"#,
            ),
            "24",
        )
        .await
        .unwrap();
    let c = service
        .create_order_in_year(order_form("C", TWO_ITEMS), "24")
        .await
        .unwrap();
    service.change_status(b.id, OrderStatus::Completed).await.unwrap();
    service.change_status(c.id, OrderStatus::Cancelled).await.unwrap();

    let stats = service.statistics().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.pendentes, 1);
    assert_eq!(stats.concluidas, 1);
    assert_eq!(stats.canceladas, 1);
    assert_eq!(stats.valor_total, 60.0);
    assert_eq!(stats.valor_pendente, 25.0);
    assert_eq!(a.valor_total, 25.0);
}

#[tokio::test]
async fn test_blank_optional_fields_stored_as_null() {
    let db = setup_db().await;
    let service = OrderService::new(db);

    let form = OrderForm {
        cliente: "Acme".to_string(),
        email: Some("   ".to_string()),
        ..Default::default()
    };
    let order = service.create_order_in_year(form, "24").await.unwrap();
    assert_eq!(order.email, None);
    assert_eq!(order.endereco, None);
    assert_eq!(order.valor_total, 0.0);
}
