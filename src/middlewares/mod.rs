//! 认证授权中间件
//!
//! - `RequireJWT`: 校验 Bearer token 并把用户信息挂到请求扩展
//! - `RequireRole`: 基于角色的路由级门禁（需在 RequireJWT 之后）
//! - `RateLimit`: 按时间窗口限流

pub mod rate_limit;
pub mod require_jwt;
pub mod require_role;

pub use rate_limit::RateLimit;
pub use require_jwt::RequireJWT;
pub use require_role::RequireRole;

use actix_web::{
    HttpResponse,
    http::StatusCode,
    http::header::CONTENT_TYPE,
};

use crate::models::{ApiResponse, ErrorCode};

/// 构造统一的中间件错误响应
pub(crate) fn create_error_response(
    status: StatusCode,
    code: ErrorCode,
    message: &str,
) -> HttpResponse {
    match status {
        StatusCode::NO_CONTENT => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
            .finish(),
        _ => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(ApiResponse::<()>::error_empty(code, message)),
    }
}
