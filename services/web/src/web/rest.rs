//! services/web/src/web/rest.rs
//!
//! Contains the Axum handlers for the JSON API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::ApiError;
use crate::web::params::ListParams;
use crate::web::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use inventory_core::commands::{Command, Outcome};
use inventory_core::domain::{Product, QueryState};
use inventory_core::metrics::InventorySummary;
use inventory_core::ports::{PortError, PortResult};
use inventory_core::query::derive_view;
use inventory_core::view::Notice;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_products_handler,
        summary_handler,
        command_handler,
    ),
    components(
        schemas(
            ProductDto,
            ProductListResponse,
            CategoryDto,
            SummaryResponse,
            CommandRequest,
            CommandResponse,
            NoticeDto,
        )
    ),
    tags(
        (name = "Inventory API", description = "Read the product catalog and run inventory commands.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub description: String,
    pub image: String,
    /// `price × stock`.
    pub inventory_value: f64,
    pub low_stock: bool,
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.to_string(),
            price: product.price,
            stock: product.stock,
            description: product.description.clone(),
            image: product.image.clone(),
            inventory_value: product.inventory_value(),
            low_stock: product.is_low_stock(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    /// Number of products that matched.
    pub count: usize,
    /// Number of products in the store.
    pub total: usize,
    pub products: Vec<ProductDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub category: String,
    pub count: usize,
    pub value: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub total_products: usize,
    pub total_value: f64,
    pub category_count: usize,
    pub low_stock_count: usize,
    pub total_stock: u64,
    pub average_price: f64,
    pub top_by_value: Vec<ProductDto>,
    pub low_stock: Vec<ProductDto>,
    pub by_category: Vec<CategoryDto>,
}

impl From<InventorySummary> for SummaryResponse {
    fn from(summary: InventorySummary) -> Self {
        Self {
            total_products: summary.total_products,
            total_value: summary.total_value,
            category_count: summary.category_count,
            low_stock_count: summary.low_stock_count,
            total_stock: summary.total_stock,
            average_price: summary.average_price,
            top_by_value: summary.top_by_value.iter().map(ProductDto::from).collect(),
            low_stock: summary.low_stock.iter().map(ProductDto::from).collect(),
            by_category: summary
                .by_category
                .iter()
                .map(|row| CategoryDto {
                    category: row.category.to_string(),
                    count: row.count,
                    value: row.value,
                })
                .collect(),
        }
    }
}

/// A command for the inventory, e.g.
/// `{"action": "delete_product", "params": {"id": 3}}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommandRequest {
    /// The action name, such as `create_product` or `toggle_theme`.
    pub action: String,
    /// The action's fields. Omit for actions without parameters.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub params: Value,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NoticeDto {
    pub level: String,
    pub message: String,
}

impl From<Notice> for NoticeDto {
    fn from(notice: Notice) -> Self {
        Self {
            level: notice.level.as_str().to_string(),
            message: notice.message,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommandResponse {
    pub action: String,
    /// The outcome, tagged by an `outcome` field (`created`, `not_found`, `invalid`, ...).
    #[schema(value_type = Object)]
    pub outcome: Value,
    pub notice: Option<NoticeDto>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List products.
///
/// Filters and sorts the catalog with the given parameters. Parameters left
/// out take their defaults; the API never reads or changes the browser
/// session's query state.
#[utoipa::path(
    get,
    path = "/api/products",
    params(ListParams),
    responses(
        (status = 200, description = "The matching products", body = ProductListResponse),
        (status = 400, description = "Unknown category, sort field or order")
    )
)]
pub async fn list_products_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let query = params.apply_to(&QueryState::default())?;
    let app = state.app.lock().await;
    let products = derive_view(app.store().as_slice(), &query);
    Ok(Json(ProductListResponse {
        count: products.len(),
        total: app.store().len(),
        products: products.iter().map(ProductDto::from).collect(),
    }))
}

/// Inventory metrics.
#[utoipa::path(
    get,
    path = "/api/summary",
    responses(
        (status = 200, description = "Metrics over the whole catalog", body = SummaryResponse)
    )
)]
pub async fn summary_handler(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    let app = state.app.lock().await;
    Json(app.summary().into())
}

/// Run a command.
#[utoipa::path(
    post,
    path = "/api/commands",
    request_body = CommandRequest,
    responses(
        (status = 200, description = "Command applied", body = CommandResponse),
        (status = 201, description = "Product created", body = CommandResponse),
        (status = 400, description = "Unknown action or malformed parameters"),
        (status = 404, description = "The referenced product does not exist", body = CommandResponse),
        (status = 422, description = "The product form failed validation", body = CommandResponse),
        (status = 500, description = "The change could not be saved")
    )
)]
pub async fn command_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Result<(StatusCode, Json<CommandResponse>), ApiError> {
    let action = request.action.clone();
    let command = parse_command(request)?;

    let mut app = state.app.lock().await;
    let result = app.dispatch(command)?;
    // The caller receives this notice in the response body.
    if let Some(notice) = &result.notice {
        app.acknowledge_notice(notice);
    }
    drop(app);

    let status = match &result.outcome {
        Outcome::Created { .. } => StatusCode::CREATED,
        Outcome::NotFound { .. } => StatusCode::NOT_FOUND,
        Outcome::Invalid { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    };
    info!("API command {} answered {}", action, status);

    Ok((
        status,
        Json(CommandResponse {
            action,
            outcome: serde_json::to_value(&result.outcome)?,
            notice: result.notice.map(NoticeDto::from),
        }),
    ))
}

/// Folds the action name into the parameters and decodes the tagged command.
fn parse_command(request: CommandRequest) -> PortResult<Command> {
    let mut fields = match request.params {
        Value::Null => Map::new(),
        Value::Object(fields) => fields,
        _ => {
            return Err(PortError::InvalidInput(
                "params must be a JSON object".to_string(),
            ))
        }
    };
    fields.insert("action".to_string(), Value::String(request.action.clone()));
    serde_json::from_value(Value::Object(fields)).map_err(|e| {
        if e.to_string().starts_with("unknown variant") {
            PortError::UnknownAction(request.action)
        } else {
            PortError::InvalidInput(e.to_string())
        }
    })
}
