use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::services::permissions::ensure_course_permission;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, assignments::requests::UpdateAssignmentRequest},
    utils::sanitize::{sanitize_input, validate_input},
    utils::validate::{
        ASSIGNMENT_CONTENT_MAX_LEN, ASSIGNMENT_TITLE_MAX_LEN, validate_text,
    },
};

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    mut req: UpdateAssignmentRequest,
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

    // 字段校验与转义
    if let Some(ref title) = req.title {
        if let Err(msg) = validate_text(title, ASSIGNMENT_TITLE_MAX_LEN) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationError,
                format!("作业标题不合法: {msg}"),
            )));
        }
        if let Err(msg) = validate_input(title, "作业标题") {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
        }
    }
    if let Some(ref content) = req.content {
        if let Err(msg) = validate_text(content, ASSIGNMENT_CONTENT_MAX_LEN) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationError,
                format!("作业内容不合法: {msg}"),
            )));
        }
        if let Err(msg) = validate_input(content, "作业内容") {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
        }
    }

    // 新的截止时间必须在未来
    if let Some(due_at) = req.due_at
        && due_at <= chrono::Utc::now()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AssignmentDeadlineInvalid,
            "截止时间必须晚于当前时间",
        )));
    }

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

    // 权限校验：主讲或副教授
    if let Err(resp) = ensure_course_permission(&user, &course) {
        return Ok(resp);
    }

    req.title = req.title.map(|t| sanitize_input(t.trim()));
    req.content = req.content.map(|c| sanitize_input(c.trim()));

    match storage.update_assignment(assignment_id, req).await {
        Ok(Some(assignment)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业已更新")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新作业失败: {e}"),
            )),
        ),
    }
}
