use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::services::permissions::has_permission_for_course;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, users::entities::UserRole},
};

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
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

    // 访问权限：管理员 / 课程教授 / 已选课学生
    let permitted = match user.role {
        UserRole::Admin => true,
        UserRole::Professor => {
            let course = match storage.get_course_by_code(&assignment.course_code).await {
                Ok(course) => course,
                Err(e) => {
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("查询课程失败: {e}"),
                        )),
                    );
                }
            };
            has_permission_for_course(Some(&user), course.as_ref())
        }
        UserRole::Student => {
            match storage
                .is_student_enrolled(user.id, &assignment.course_code)
                .await
            {
                Ok(enrolled) => enrolled,
                Err(e) => {
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("查询选课记录失败: {e}"),
                        )),
                    );
                }
            }
        }
    };

    if !permitted {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CoursePermissionDenied,
            "You do not have access to this assignment",
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "查询成功")))
}
