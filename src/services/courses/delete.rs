use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::services::permissions::ensure_main_professor;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode},
};

/// 删除课程
///
/// 仅主讲教授（或管理员）可删。存储层在单个事务中完成
/// 提交 -> 答案 -> 问题 -> 作业 -> 选课 -> 课程的级联清理。
pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_code: String,
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

    // 查询课程信息
    let course = match storage.get_course_by_code(&course_code).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询课程失败: {e}"),
                )),
            );
        }
    };

    // 权限校验：课程删除只属于主讲教授
    if let Err(resp) = ensure_main_professor(&user, &course) {
        return Ok(resp);
    }

    match storage.delete_course(&course_code).await {
        Ok(true) => {
            tracing::info!("Course {} deleted by user {}", course_code, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("课程及其全部数据已删除")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::CourseDeleteFailed,
                format!("删除课程失败: {e}"),
            )),
        ),
    }
}
