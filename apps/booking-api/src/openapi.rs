use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Booking API",
        version = "0.1.0",
        description = "API for managing hotel room reservations and retail orders"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/reservations", api = domain_reservations::handlers::ApiDoc),
        (path = "/orders", api = domain_orders::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
