use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if RequireJWT::extract_user_id(request) == Some(user_id) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Cannot delete your own account",
        )));
    }

    match storage.delete_user(user_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("用户已删除"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除用户失败: {e}"),
            )),
        ),
    }
}
