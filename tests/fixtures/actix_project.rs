// Actix-Web test fixture - an order API mounted under a scope
use actix_web::{delete, get, post, web, App, HttpResponse, HttpServer};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
}

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    pub page: Option<u32>,
    #[serde(rename = "per_page")]
    pub limit: Option<u32>,
    /// Only orders in this state
    pub status: Option<OrderStatus>,
}

/// A new order
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub item_id: u32,
    pub quantity: u32,
    pub gift_note: Option<String>,
}

#[get("/schema/")]
async fn serve_schema() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// List orders
///
/// Filter by state with the `status` query parameter.
#[get("/orders")]
async fn list_orders(query: web::Query<OrderQuery>) -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Place an order
#[post("/orders")]
async fn create_order(order: web::Json<CreateOrder>) -> HttpResponse {
    HttpResponse::Created().finish()
}

/// Fetch one item of an order
#[get("/orders/{order_id}/items/{item_id}")]
async fn get_order_item(path: web::Path<(u32, u32)>) -> HttpResponse {
    let (order_id, item_id) = path.into_inner();
    HttpResponse::Ok().body(format!("{} {}", order_id, item_id))
}

#[delete("/orders/{order_id}")]
async fn cancel_order(order_id: web::Path<u32>) -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[get("/metrics")]
#[doc(hidden)]
async fn metrics() -> HttpResponse {
    HttpResponse::Ok().finish()
}

fn orders_config(cfg: &mut web::ServiceConfig) {
    cfg.service(list_orders)
        .service(create_order)
        .service(get_order_item)
        .service(cancel_order);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    HttpServer::new(|| {
        App::new()
            .service(serve_schema)
            .service(metrics)
            .service(web::scope("/api").configure(orders_config))
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
