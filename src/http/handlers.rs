//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};

use super::dto::{CancelResponse, CreateOrderQuery, HealthResponse, OrderDto};
use super::error::AppError;
use super::state::AppState;
use crate::api::OrderId;
use crate::db::services as db_services;
use crate::services::orders;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Minimal browser client: subscribes to the WebSocket feed and renders
/// every order update as it arrives.
const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <title>Live Orders</title>
    </head>
    <body>
        <h1>Live order updates</h1>
        <ul id="updates"></ul>
        <script>
            var scheme = location.protocol === "https:" ? "wss://" : "ws://";
            var ws = new WebSocket(scheme + location.host + "/ws");
            ws.onmessage = function (event) {
                var updates = document.getElementById("updates");
                var item = document.createElement("li");
                item.appendChild(document.createTextNode(event.data));
                updates.appendChild(item);
            };
        </script>
    </body>
</html>
"#;

/// GET /
///
/// Landing page with an embedded WebSocket client.
pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// GET /health
///
/// Health check endpoint to verify the service is running and the order
/// store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let store_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "available".to_string(),
        Ok(false) => "unavailable".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        store: store_status,
    }))
}

/// POST /orders?execute_order=<bool>
///
/// Create a new order in `PENDING` status. Unless `execute_order=false`, the
/// order is executed before the response is sent, so the body reflects the
/// `EXECUTED` state and WebSocket clients have already seen both updates.
pub async fn create_order(
    State(state): State<AppState>,
    Query(query): Query<CreateOrderQuery>,
) -> HandlerResult<OrderDto> {
    let order = orders::create_order(
        &state.repository,
        &state.events,
        state.execution,
        query.execute_order,
    )
    .await?;
    Ok(Json(order.into()))
}

/// GET /orders
///
/// List all orders. Responds 404 when the store is empty; existing clients
/// rely on this rather than an empty array.
pub async fn list_orders(State(state): State<AppState>) -> HandlerResult<Vec<OrderDto>> {
    let orders = orders::list_orders(&state.repository).await?;
    if orders.is_empty() {
        return Err(AppError::NotFound("Orders are empty".to_string()));
    }
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// GET /orders/{order_id}
///
/// Fetch the details of an order by its ID.
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> HandlerResult<OrderDto> {
    let id = OrderId::new(order_id);
    let order = orders::get_order(&state.repository, &id).await?;
    Ok(Json(order.into()))
}

/// DELETE /orders/{order_id}
///
/// Cancel a `PENDING` order by its ID.
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> HandlerResult<CancelResponse> {
    let id = OrderId::new(order_id);
    orders::cancel_order(&state.repository, &state.events, &id).await?;
    Ok(Json(CancelResponse {
        detail: "Order cancelled".to_string(),
    }))
}
