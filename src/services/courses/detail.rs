use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::services::permissions::{has_permission_for_course, is_main_professor};
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode, courses::responses::CourseDetailResponse,
        users::entities::UserRole,
    },
};

pub async fn get_course_detail(
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

    // 访问权限：管理员 / 主讲或副教授 / 已选课学生
    let permitted = match user.role {
        UserRole::Admin => true,
        UserRole::Professor => has_permission_for_course(Some(&user), Some(&course)),
        UserRole::Student => match storage.is_student_enrolled(user.id, &course_code).await {
            Ok(enrolled) => enrolled,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询选课记录失败: {e}"),
                    )),
                );
            }
        },
    };

    if !permitted {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "You do not have access to this course",
        )));
    }

    let students = match storage.list_course_students(&course_code).await {
        Ok(students) => students,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学生列表失败: {e}"),
                )),
            );
        }
    };

    let assignments = match storage.list_course_assignments(&course_code).await {
        Ok(assignments) => assignments,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业列表失败: {e}"),
                )),
            );
        }
    };

    let is_main = is_main_professor(Some(&user), Some(&course));
    let student_count = students.len() as i64;
    let assignment_count = assignments.len() as i64;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseDetailResponse {
            course,
            students,
            assignments,
            student_count,
            assignment_count,
            is_main_professor: is_main,
        },
        "查询成功",
    )))
}
