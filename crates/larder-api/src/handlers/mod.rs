//! HTTP 请求处理器模块
//!
//! 处理器只负责提取参数、调用服务并包装响应，业务逻辑在 `service` 层

pub mod auth;
pub mod health;
pub mod measure;
pub mod recipe;
pub mod role;
pub mod step;
pub mod storage;
pub mod storage_type;
pub mod tip;
pub mod user;

use axum::Json;

use crate::dto::ApiResponse;
use crate::error::Result;

/// 处理器统一返回类型
pub type ApiResult<T> = Result<Json<ApiResponse<T>>>;

pub(crate) fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// 无数据的成功响应（删除、恢复、解除关联）
pub(crate) fn done() -> ApiResult<()> {
    Ok(Json(ApiResponse::<()>::success_empty()))
}
