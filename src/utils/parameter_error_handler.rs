//! 请求参数解析错误处理
//!
//! JSON 体与查询串解析失败时返回统一的 400 响应，而不是 actix 默认的纯文本。

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析错误处理器
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("Invalid JSON payload: {err}");
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
        ErrorCode::BadRequest,
        message.clone(),
    ));
    InternalError::from_response(message, response).into()
}

/// 查询参数解析错误处理器
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("Invalid query parameters: {err}");
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
        ErrorCode::BadRequest,
        message.clone(),
    ));
    InternalError::from_response(message, response).into()
}
