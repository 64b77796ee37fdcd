use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, submissions::requests::CreateSubmissionRequest},
    utils::sanitize::{sanitize_input, validate_input},
    utils::validate::{SUBMISSION_CONTENT_MAX_LEN, validate_text},
};

/// 学生提交作业
///
/// 前置条件：已选课、未过截止时间。重复提交由
/// (assignment_id, student_id) 唯一索引在插入时拦截，
/// 并发双写也只会成功一次。
pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    mut req: CreateSubmissionRequest,
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

    // 内容校验
    if let Err(msg) = validate_text(&req.content, SUBMISSION_CONTENT_MAX_LEN) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            format!("提交内容不合法: {msg}"),
        )));
    }
    if let Err(msg) = validate_input(&req.content, "提交内容") {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    let storage = service.get_storage(request);

    // 作业必须存在
    let assignment = match storage.get_assignment_by_id(req.assignment_id).await {
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

    // 必须已选课
    match storage
        .is_student_enrolled(user_id, &assignment.course_code)
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

    // 截止时间检查
    if assignment.is_past_due(chrono::Utc::now()) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AssignmentDeadlinePassed,
            "作业提交期限已过",
        )));
    }

    // 附件必须是本人上传的文件
    if let Some(ref token) = req.file_token {
        match storage.get_file_by_token(token).await {
            Ok(Some(file)) if file.user_id == user_id => {}
            Ok(Some(_)) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "无权使用此文件",
                )));
            }
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::FileNotFound,
                    "附件不存在",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询附件失败: {e}"),
                    )),
                );
            }
        }
    }

    req.content = sanitize_input(req.content.trim());

    match storage.create_submission(user_id, req).await {
        Ok(submission) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
        }
        Err(e) if e.is_already_exists() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::AlreadySubmitted, "该作业已提交过"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("提交失败: {e}"),
            )),
        ),
    }
}
