pub mod api;
pub mod dashboard;
pub mod order;

pub use api::api_config;
pub use dashboard::dashboard_config;
pub use order::order_config;

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::utils::flash::{FlashMessage, removal_cookie};

/// Every route of the application.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(dashboard_config)
        .configure(order_config)
        .configure(api_config);
}

/// Renders an HTML page, consuming any pending flash message.
pub(crate) fn html_page(
    req: &HttpRequest,
    render: impl FnOnce(Option<&FlashMessage>) -> String,
) -> HttpResponse {
    let flash = FlashMessage::from_request(req);
    let mut builder = HttpResponse::Ok();
    builder.content_type(ContentType::html());
    if flash.is_some() {
        builder.cookie(removal_cookie());
    }
    builder.body(render(flash.as_ref()))
}
