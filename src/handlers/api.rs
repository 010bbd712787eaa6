use crate::models::*;
use crate::services::OrderService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/api/estatisticas",
    tag = "api",
    responses(
        (status = 200, description = "Totals over all orders", body = StatisticsResponse)
    )
)]
pub async fn get_statistics(order_service: web::Data<OrderService>) -> Result<HttpResponse> {
    match order_service.statistics().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(StatisticsResponse::from(stats))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").route("/estatisticas", web::get().to(get_statistics)));
}
