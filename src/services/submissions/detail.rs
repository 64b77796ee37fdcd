use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::services::permissions::has_permission_for_course;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, users::entities::UserRole},
};

/// 提交详情：提交者本人、课程教授或管理员可见
pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
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

    // 提交者本人
    if submission.student_id == user.id {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "查询成功")));
    }

    // 管理员
    if user.role == UserRole::Admin {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "查询成功")));
    }

    // 课程教授（主讲或副教授）
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

    if has_permission_for_course(Some(&user), course.as_ref()) {
        Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "查询成功")))
    } else {
        Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "没有查看该提交的权限",
        )))
    }
}

/// 当前学生对某作业的提交
pub async fn get_my_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
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

    match storage
        .get_submission_by_assignment_and_student(assignment_id, user_id)
        .await
    {
        Ok(Some(submission)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "尚未提交该作业",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交失败: {e}"),
            )),
        ),
    }
}
