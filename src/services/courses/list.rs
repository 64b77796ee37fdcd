use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode, courses::responses::CourseListResponse,
        users::entities::UserRole,
    },
};

pub async fn list_my_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    let storage = service.get_storage(request);

    let result = match user.role {
        UserRole::Student => storage.list_student_courses(user.id).await,
        // 管理员没有"自己的课程"，复用教授查询（返回其名下课程，一般为空）
        UserRole::Professor | UserRole::Admin => storage.list_professor_courses(user.id).await,
    };

    match result {
        Ok(items) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(CourseListResponse { items }, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询课程列表失败: {e}"),
            )),
        ),
    }
}
