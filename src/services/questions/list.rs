use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::services::permissions::has_permission_for_course;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode, questions::responses::QuestionListResponse,
        users::entities::UserRole,
    },
};

/// 列出作业下的问题
///
/// 学生看到自己的提问（含答案），课程教授与管理员看到全部。
pub async fn list_assignment_questions(
    service: &QuestionService,
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

    let result = match user.role {
        UserRole::Student => {
            // 学生需已选课，且只能看到自己的提问
            match storage
                .is_student_enrolled(user.id, &assignment.course_code)
                .await
            {
                Ok(true) => {}
                Ok(false) => {
                    return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::NotEnrolled,
                        "未选修该作业所属课程",
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
            storage
                .list_student_assignment_questions(assignment_id, user.id)
                .await
        }
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

            if !has_permission_for_course(Some(&user), course.as_ref()) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::CoursePermissionDenied,
                    "You do not have access to this course",
                )));
            }

            storage.list_assignment_questions(assignment_id).await
        }
        UserRole::Admin => storage.list_assignment_questions(assignment_id).await,
    };

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuestionListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询问题列表失败: {e}"),
            )),
        ),
    }
}

/// 教授视角：名下（主讲或副教授）课程的全部问题
pub async fn list_my_questions(
    service: &QuestionService,
    request: &HttpRequest,
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

    let storage = service.get_storage(request);

    match storage.list_professor_questions(user_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            QuestionListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询问题列表失败: {e}"),
            )),
        ),
    }
}
