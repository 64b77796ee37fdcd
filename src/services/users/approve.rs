use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

/// 设置用户审批状态（approve / revoke 共用）
pub async fn set_allowed(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    allowed: bool,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 管理员不能撤销自己的审批状态
    if !allowed && RequireJWT::extract_user_id(request) == Some(user_id) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Cannot revoke your own account",
        )));
    }

    match storage.set_user_allowed(user_id, allowed).await {
        Ok(true) => {
            let message = if allowed {
                "账号已审批通过"
            } else {
                "账号审批已撤销"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(message)))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新审批状态失败: {e}"),
            )),
        ),
    }
}
