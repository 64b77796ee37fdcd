use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, courses::requests::EnrollRequest},
    utils::validate::validate_course_code,
};

/// 学生凭课程代码选课
pub async fn enroll(
    service: &CourseService,
    request: &HttpRequest,
    enroll_data: EnrollRequest,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    let course_code = enroll_data.course_code.trim().to_uppercase();
    if let Err(msg) = validate_course_code(&course_code) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CourseCodeInvalid, msg)));
    }

    let storage = service.get_storage(request);

    // 课程必须存在
    match storage.get_course_by_code(&course_code).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "课程代码不正确",
            )));
        }
        Err(e) => {
            error!("Error getting course by code: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询课程失败: {e}"),
                )),
            );
        }
    }

    match storage.enroll_student(user_id, &course_code).await {
        Ok(enrollment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment, "选课成功")))
        }
        // (student_id, course_code) 复合主键兜底重复选课
        Err(e) if e.is_already_exists() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::AlreadyEnrolled, "已选过该课程"),
        )),
        Err(e) => {
            error!("Error enrolling student: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to enroll in course",
                )),
            )
        }
    }
}
