use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, ValidatedJson, extract_ip_from_headers, extract_user_agent,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{
    CreateOrder, DeleteConfirmation, Order, OrderLine, OrderLineInput, OrderStatus,
    ProductSummary, ReplaceOrder,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

const TAG: &str = "orders";

/// OpenAPI documentation for Orders API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_orders,
        create_order,
        get_order,
        replace_order,
        delete_order,
    ),
    components(
        schemas(
            Order,
            OrderLine,
            OrderLineInput,
            OrderStatus,
            ProductSummary,
            CreateOrder,
            ReplaceOrder,
            DeleteConfirmation
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Retail order endpoints")
    )
)]
pub struct ApiDoc;

/// Create the order router with all HTTP endpoints
pub fn router<R: OrderRepository + 'static>(service: OrderService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/{id}",
            get(get_order).put(replace_order).delete(delete_order),
        )
        .with_state(shared_service)
}

/// List all orders
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of orders", body = Vec<Order>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
) -> OrderResult<Json<Vec<Order>>> {
    let orders = service.list_orders().await?;
    Ok(Json(orders))
}

/// Create a new order
///
/// Every line's product must resolve; a single unknown product aborts
/// the whole request and nothing is persisted.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created successfully", body = Order),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<impl IntoResponse> {
    let order = service.create_order(input).await?;

    // Audit log successful creation
    AuditEvent::new(
        None,
        "order.create",
        Some(format!("order:{}", order.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "buyer_name": order.buyer_name,
        "status": order.status.to_string(),
        "lines": order.lines.len(),
    }))
    .log();

    Ok((StatusCode::CREATED, Json(order)))
}

/// Get an order by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    IdPath(id): IdPath,
) -> OrderResult<Json<Order>> {
    let order = service.get_order(id).await?;
    Ok(Json(order))
}

/// Replace an order
///
/// A full replacement: all scalar fields are required and overwrite the
/// stored values, and the supplied lines replace the existing line set
/// wholesale.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    request_body = ReplaceOrder,
    responses(
        (status = 200, description = "Order replaced successfully", body = Order),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn replace_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ReplaceOrder>,
) -> OrderResult<Json<Order>> {
    let order = service.replace_order(id, input).await?;
    Ok(Json(order))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order deleted successfully", body = DeleteConfirmation),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_order<R: OrderRepository>(
    State(service): State<Arc<OrderService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> OrderResult<impl IntoResponse> {
    service.delete_order(id).await?;

    // Audit log successful deletion
    AuditEvent::new(
        None,
        "order.delete",
        Some(format!("order:{}", id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok((
        StatusCode::OK,
        Json(DeleteConfirmation {
            message: "Order deleted successfully".to_string(),
        }),
    ))
}
