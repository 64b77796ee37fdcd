use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_approval_stats(
    service: &UserService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_approval_stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询审批统计失败: {e}"),
            )),
        ),
    }
}
