use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::services::permissions::ensure_course_permission;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, courses::responses::CourseStudentsResponse},
};

/// 列出课程学生（主讲/副教授）
pub async fn list_students(
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

    if let Err(resp) = ensure_course_permission(&user, &course) {
        return Ok(resp);
    }

    match storage.list_course_students(&course_code).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseStudentsResponse {
                course_code,
                students,
            },
            "查询成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询学生列表失败: {e}"),
            )),
        ),
    }
}

/// 将学生移出课程（主讲/副教授）
///
/// 存储层先清理该学生在课程内的提交与问答，再删选课记录，单事务。
pub async fn remove_student(
    service: &CourseService,
    request: &HttpRequest,
    course_code: String,
    student_id: i64,
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

    if let Err(resp) = ensure_course_permission(&user, &course) {
        return Ok(resp);
    }

    // 未选课的学生给出明确错误，而不是静默成功
    match storage.is_student_enrolled(student_id, &course_code).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::NotEnrolled,
                "该学生未选修这门课程",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询选课记录失败: {e}"),
                )),
            );
        }
    }

    match storage
        .remove_student_from_course(student_id, &course_code)
        .await
    {
        Ok(()) => {
            tracing::info!(
                "Student {} removed from course {} by user {}",
                student_id,
                course_code,
                user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("学生已移出课程")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("移出课程失败: {e}"),
            )),
        ),
    }
}
