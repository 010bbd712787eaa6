use crate::entities::OrderStatus;
use crate::error::AppError;
use crate::handlers::html_page;
use crate::models::*;
use crate::services::OrderService;
use crate::utils::flash::{FlashMessage, redirect_with_flash};
use crate::views::{render_order_form, render_order_view, render_print};
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

fn order_url(id: i32) -> String {
    format!("/ordem/{id}")
}

#[utoipa::path(
    get,
    path = "/ordem/nova",
    tag = "order",
    responses(
        (status = 200, description = "Empty order form", body = String, content_type = "text/html")
    )
)]
pub async fn new_order_form(req: HttpRequest) -> Result<HttpResponse> {
    Ok(html_page(&req, |flash| render_order_form(None, flash)))
}

#[utoipa::path(
    post,
    path = "/ordem/nova",
    tag = "order",
    request_body(content = OrderForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirects to the order; on failure back to the form")
    )
)]
pub async fn create_order(
    order_service: web::Data<OrderService>,
    form: web::Form<OrderForm>,
) -> Result<HttpResponse> {
    match order_service.create_order(form.into_inner()).await {
        Ok(order) => Ok(redirect_with_flash(
            &order_url(order.id),
            FlashMessage::success(format!(
                "Ordem de Serviço {} criada com sucesso!",
                order.numero
            )),
        )),
        Err(e) => {
            log::warn!("Failed to create service order: {e}");
            Ok(redirect_with_flash(
                "/ordem/nova",
                FlashMessage::error(format!("Erro ao criar ordem: {}", e.user_message())),
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/ordem/{id}",
    tag = "order",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order detail", body = String, content_type = "text/html"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn show_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    match order_service.get_order(path.into_inner()).await {
        Ok(detail) => Ok(html_page(&req, |flash| render_order_view(&detail, flash))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/ordem/{id}/editar",
    tag = "order",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order form filled with the current values", body = String, content_type = "text/html"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn edit_order_form(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    match order_service.get_order(path.into_inner()).await {
        Ok(detail) => Ok(html_page(&req, |flash| {
            render_order_form(Some(&detail), flash)
        })),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/ordem/{id}/editar",
    tag = "order",
    params(("id" = i32, Path, description = "Order id")),
    request_body(content = OrderForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirects to the order; on failure back to the form"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
    form: web::Form<OrderForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    match order_service.update_order(id, form.into_inner()).await {
        Ok(order) => Ok(redirect_with_flash(
            &order_url(order.id),
            FlashMessage::success(format!(
                "Ordem de Serviço {} atualizada com sucesso!",
                order.numero
            )),
        )),
        Err(e @ AppError::NotFound(_)) => Ok(e.error_response()),
        Err(e) => {
            log::warn!("Failed to update service order {id}: {e}");
            Ok(redirect_with_flash(
                &format!("/ordem/{id}/editar"),
                FlashMessage::error(format!("Erro ao atualizar ordem: {}", e.user_message())),
            ))
        }
    }
}

#[utoipa::path(
    post,
    path = "/ordem/{id}/status",
    tag = "order",
    params(("id" = i32, Path, description = "Order id")),
    request_body(content = StatusForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirects to the order with the outcome as a flash message"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn change_status(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
    form: web::Form<StatusForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let requested = form.into_inner().status.unwrap_or_default();

    let status = match requested.trim().parse::<OrderStatus>() {
        Ok(status) => status,
        Err(e) => {
            // unknown order ids still answer 404
            if let Err(not_found) = order_service.find_order(id).await {
                return Ok(not_found.error_response());
            }
            log::warn!("Rejected status change for order {id}: {e}");
            return Ok(redirect_with_flash(
                &order_url(id),
                FlashMessage::error(e.user_message()),
            ));
        }
    };

    match order_service.change_status(id, status).await {
        Ok(order) => Ok(redirect_with_flash(
            &order_url(order.id),
            FlashMessage::success(format!("Status alterado para {}!", status.label())),
        )),
        Err(e @ AppError::NotFound(_)) => Ok(e.error_response()),
        Err(e) => {
            log::error!("Failed to change status of order {id}: {e}");
            Ok(redirect_with_flash(
                &order_url(id),
                FlashMessage::error(format!("Erro ao alterar status: {}", e.user_message())),
            ))
        }
    }
}

#[utoipa::path(
    post,
    path = "/ordem/{id}/excluir",
    tag = "order",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 303, description = "Deleted, redirects to the dashboard"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match order_service.delete_order(path.into_inner()).await {
        Ok(numero) => Ok(redirect_with_flash(
            "/",
            FlashMessage::success(format!("Ordem de Serviço {numero} excluída!")),
        )),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/ordem/{id}/imprimir",
    tag = "order",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Printable order", body = String, content_type = "text/html"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn print_order(
    order_service: web::Data<OrderService>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match order_service.get_order(path.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(render_print(&detail))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ordem")
            .service(
                web::resource("/nova")
                    .route(web::get().to(new_order_form))
                    .route(web::post().to(create_order)),
            )
            .route("/{id}", web::get().to(show_order))
            .service(
                web::resource("/{id}/editar")
                    .route(web::get().to(edit_order_form))
                    .route(web::post().to(update_order)),
            )
            .route("/{id}/status", web::post().to(change_status))
            .route("/{id}/excluir", web::post().to(delete_order))
            .route("/{id}/imprimir", web::get().to(print_order)),
    );
}
