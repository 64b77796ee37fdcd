use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::services::permissions::ensure_course_permission;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode, submissions::responses::CourseGradesResponse,
        users::entities::UserRole,
    },
};

/// 列出作业的全部提交（主讲/副教授）
pub async fn list_assignment_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业失败: {e}"),
                )),
            );
        }
    };

    let course = match storage.get_course_by_code(&assignment.course_code).await {
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

    match storage.list_assignment_submissions(assignment_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交列表失败: {e}"),
            )),
        ),
    }
}

/// 学生在某课程内的成绩单
///
/// 学生本人查自己的；教授需有课程权限。
pub async fn get_course_grades(
    service: &SubmissionService,
    request: &HttpRequest,
    course_code: String,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
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

    // 学生只能看自己的成绩单，教授/管理员需要课程权限
    match user.role {
        UserRole::Student => {
            if user.id != student_id {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能查看自己的成绩",
                )));
            }
        }
        _ => {
            if let Err(resp) = ensure_course_permission(&user, &course) {
                return Ok(resp);
            }
        }
    }

    match storage
        .list_student_submissions_in_course(student_id, &course_code)
        .await
    {
        Ok(submissions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseGradesResponse {
                course_code,
                student_id,
                submissions,
            },
            "查询成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询成绩失败: {e}"),
            )),
        ),
    }
}
