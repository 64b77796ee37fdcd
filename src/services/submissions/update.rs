use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, submissions::requests::UpdateSubmissionRequest},
    utils::sanitize::{sanitize_input, validate_input},
    utils::validate::{SUBMISSION_CONTENT_MAX_LEN, validate_text},
};

/// 修改提交（仅提交者本人，截止前）
pub async fn update_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    mut req: UpdateSubmissionRequest,
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

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    };

    // 仅提交者本人可修改
    if submission.student_id != user_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotSubmissionOwner,
            "只能修改自己的提交",
        )));
    }

    // 截止时间检查
    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
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

    if assignment.is_past_due(chrono::Utc::now()) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AssignmentDeadlinePassed,
            "提交期限已过，无法修改",
        )));
    }

    // 更换附件时校验所有权
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

    match storage
        .update_submission_content(submission_id, req.content, req.file_token)
        .await
    {
        Ok(Some(submission)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "提交已更新")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("修改提交失败: {e}"),
            )),
        ),
    }
}
