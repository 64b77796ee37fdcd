use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::services::permissions::ensure_course_permission;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, submissions::requests::GradeSubmissionRequest},
    utils::sanitize::{sanitize_input, validate_input},
    utils::validate::{FEEDBACK_MAX_LEN, validate_score},
};

/// 评分
///
/// 主讲/副教授可评分；截止时间不限制评分，重复评分覆盖
/// score/feedback，提交内容保持不变。
pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    mut req: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 分数必须落在 [0, 100]
    if let Err(msg) = validate_score(req.score) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ScoreOutOfRange, msg)));
    }

    // 评语校验与转义
    if let Some(feedback) = req.feedback.take() {
        let trimmed = feedback.trim().to_string();
        if !trimmed.is_empty() {
            if trimmed.chars().count() > FEEDBACK_MAX_LEN {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationError,
                    "评语太长（最多 1000 字）",
                )));
            }
            if let Err(msg) = validate_input(&trimmed, "评语") {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
            }
            req.feedback = Some(sanitize_input(&trimmed));
        }
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

    // 通过作业定位课程，校验评分权限
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

    match storage
        .grade_submission(submission_id, req.score, req.feedback)
        .await
    {
        Ok(Some(submission)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "评分成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("评分失败: {e}"),
            )),
        ),
    }
}
