use crate::handlers::html_page;
use crate::models::*;
use crate::services::OrderService;
use crate::views::render_dashboard;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/",
    tag = "dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Order list with statistics", body = String, content_type = "text/html"),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn index(
    order_service: web::Data<OrderService>,
    query: web::Query<DashboardQuery>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let filter = match OrderFilter::try_from(&*query) {
        Ok(filter) => filter,
        Err(e) => return Ok(e.error_response()),
    };

    let orders = match order_service.list_orders(&filter).await {
        Ok(orders) => orders,
        Err(e) => return Ok(e.error_response()),
    };

    // statistics cover the whole table, not the filtered list
    match order_service.statistics().await {
        Ok(stats) => Ok(html_page(&req, |flash| {
            render_dashboard(&orders, &stats, &query, flash)
        })),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn dashboard_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}
