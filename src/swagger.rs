use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::OrderStatus;
use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::dashboard::index,
        handlers::order::new_order_form,
        handlers::order::create_order,
        handlers::order::show_order,
        handlers::order::edit_order_form,
        handlers::order::update_order,
        handlers::order::change_status,
        handlers::order::delete_order,
        handlers::order::print_order,
        handlers::api::get_statistics,
    ),
    components(
        schemas(
            OrderForm,
            StatusForm,
            OrderStatus,
            DashboardStats,
            StatisticsResponse,
        )
    ),
    tags(
        (name = "dashboard", description = "Order list, search and totals"),
        (name = "order", description = "Service order management"),
        (name = "api", description = "JSON API"),
    ),
    info(
        title = "AM Licita Service Orders",
        version = "0.1.0",
        description = "Service order (ordem de serviço) management"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
