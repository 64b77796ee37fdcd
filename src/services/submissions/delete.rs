use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode},
};

/// 删除（撤回）提交 - 仅提交者本人，截止前
pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
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

    if submission.student_id != user_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotSubmissionOwner,
            "只能撤回自己的提交",
        )));
    }

    // 截止后不可撤回
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
            "提交期限已过，无法撤回",
        )));
    }

    match storage.delete_submission(submission_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("提交已撤回"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("删除提交失败: {e}"),
            )),
        ),
    }
}
