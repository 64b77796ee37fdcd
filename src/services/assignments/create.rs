use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::services::permissions::ensure_course_permission;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, assignments::requests::CreateAssignmentRequest},
    utils::sanitize::{sanitize_input, validate_input},
    utils::validate::{
        ASSIGNMENT_CONTENT_MAX_LEN, ASSIGNMENT_TITLE_MAX_LEN, validate_text,
    },
};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    mut req: CreateAssignmentRequest,
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

    // 标题与内容校验
    if let Err(msg) = validate_text(&req.title, ASSIGNMENT_TITLE_MAX_LEN) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            format!("作业标题不合法: {msg}"),
        )));
    }
    if let Err(msg) = validate_text(&req.content, ASSIGNMENT_CONTENT_MAX_LEN) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            format!("作业内容不合法: {msg}"),
        )));
    }
    if let Err(msg) = validate_input(&req.title, "作业标题") {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }
    if let Err(msg) = validate_input(&req.content, "作业内容") {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    // 截止时间必须在未来
    if let Some(due_at) = req.due_at
        && due_at <= chrono::Utc::now()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentDeadlineInvalid,
            "截止时间必须晚于当前时间",
        )));
    }

    let storage = service.get_storage(request);

    let course_code = req.course_code.trim().to_uppercase();
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

    // 权限校验：主讲或副教授
    if let Err(resp) = ensure_course_permission(&user, &course) {
        return Ok(resp);
    }

    req.course_code = course_code;
    req.title = sanitize_input(req.title.trim());
    req.content = sanitize_input(req.content.trim());

    match storage.create_assignment(req).await {
        Ok(assignment) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "作业创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建作业失败: {e}"),
            )),
        ),
    }
}
