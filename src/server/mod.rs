// ==========================================
// 原材料切割收益优化系统 - HTTP 服务层
// ==========================================
// 职责: 路由注册、请求解析、ApiError → HTTP 状态码映射
// 红线: API 层保持框架无关,axum 相关代码只出现在本模块
// ==========================================

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::api::error::ApiError;
use crate::app::AppState;
use crate::domain::material::PricePoint;

// ==========================================
// 错误映射
// ==========================================

/// ApiError → HTTP 响应
///
/// Unsatisfiable 使用 422 并携带目标长度,与零收益的成功响应
/// 在形态上严格区分。
fn error_response(err: ApiError) -> Response {
    let (status, body) = match &err {
        ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
        ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
        ApiError::AlreadyExists(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
        ApiError::Unsatisfiable { length } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({
                "error": format!("无法恰好切分: 现有片段尺寸无法组合出目标长度 {}", length),
                "length": length,
            }),
        ),
        ApiError::ImportError(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
        other => {
            warn!(error = %other, "内部错误");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": other.to_string() }),
            )
        }
    };
    (status, Json(body)).into_response()
}

type HandlerResult = Result<Response, Response>;

fn ok_json<T: serde::Serialize>(value: &T) -> Response {
    Json(json!(value)).into_response()
}

// ==========================================
// 请求体 DTO
// ==========================================

#[derive(Debug, Deserialize)]
struct RegisterMaterialRequest {
    name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PricePointRequest {
    size: u32,
    price: f64,
}

impl From<PricePointRequest> for PricePoint {
    fn from(req: PricePointRequest) -> Self {
        PricePoint::new(req.size, req.price)
    }
}

// ==========================================
// 路由注册
// ==========================================

/// 构建 HTTP 路由
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/materials", post(register_material).get(list_materials))
        .route(
            "/materials/:id",
            get(get_material).delete(delete_material),
        )
        .route(
            "/materials/:id/prices",
            post(register_prices).put(update_price).get(get_prices),
        )
        .route("/materials/:id/prices/items", put(add_price_point))
        .route(
            "/materials/:id/optimize-cuts/:length",
            get(optimize_cuts),
        )
        .with_state(state)
}

// ==========================================
// 材料目录
// ==========================================

async fn register_material(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterMaterialRequest>,
) -> HandlerResult {
    let material = state
        .material_api
        .register_material(&req.name, req.description)
        .map_err(error_response)?;
    Ok(ok_json(&material))
}

async fn list_materials(State(state): State<Arc<AppState>>) -> HandlerResult {
    let materials = state.material_api.list_materials().map_err(error_response)?;
    Ok(ok_json(&materials))
}

async fn get_material(
    State(state): State<Arc<AppState>>,
    Path(material_id): Path<String>,
) -> HandlerResult {
    let material = state
        .material_api
        .get_material_detail(&material_id)
        .map_err(error_response)?;
    Ok(ok_json(&material))
}

async fn delete_material(
    State(state): State<Arc<AppState>>,
    Path(material_id): Path<String>,
) -> HandlerResult {
    let material = state
        .material_api
        .delete_material(&material_id)
        .map_err(error_response)?;
    Ok(ok_json(&material))
}

// ==========================================
// 价格表
// ==========================================

async fn register_prices(
    State(state): State<Arc<AppState>>,
    Path(material_id): Path<String>,
    Json(req): Json<Vec<PricePointRequest>>,
) -> HandlerResult {
    let prices: Vec<PricePoint> = req.into_iter().map(PricePoint::from).collect();
    let count = state
        .price_api
        .register_price_list(&material_id, prices)
        .map_err(error_response)?;
    Ok(ok_json(&json!({ "message": "价格表注册成功", "count": count })))
}

async fn update_price(
    State(state): State<Arc<AppState>>,
    Path(material_id): Path<String>,
    Json(req): Json<PricePointRequest>,
) -> HandlerResult {
    state
        .price_api
        .update_price(&material_id, req.size, req.price)
        .map_err(error_response)?;
    let view = state
        .price_api
        .get_price_list(&material_id)
        .map_err(error_response)?;
    Ok(ok_json(&view))
}

async fn add_price_point(
    State(state): State<Arc<AppState>>,
    Path(material_id): Path<String>,
    Json(req): Json<PricePointRequest>,
) -> HandlerResult {
    state
        .price_api
        .add_price_point(&material_id, req.into())
        .map_err(error_response)?;
    let view = state
        .price_api
        .get_price_list(&material_id)
        .map_err(error_response)?;
    Ok(ok_json(&view))
}

async fn get_prices(
    State(state): State<Arc<AppState>>,
    Path(material_id): Path<String>,
) -> HandlerResult {
    let view = state
        .price_api
        .get_price_list(&material_id)
        .map_err(error_response)?;
    Ok(ok_json(&view))
}

// ==========================================
// 切割方案
// ==========================================

async fn optimize_cuts(
    State(state): State<Arc<AppState>>,
    Path((material_id, length)): Path<(String, i64)>,
) -> HandlerResult {
    let outcome = state
        .cutting_api
        .optimize_cuts(&material_id, length)
        .map_err(error_response)?;
    Ok(ok_json(&outcome))
}
