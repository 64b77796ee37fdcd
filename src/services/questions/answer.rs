use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::services::permissions::ensure_course_permission;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, questions::requests::CreateAnswerRequest},
    utils::sanitize::{sanitize_input, validate_input},
    utils::validate::{QA_CONTENT_MAX_LEN, validate_text},
};

/// 教授回答问题（主讲或副教授）
pub async fn answer_question(
    service: &QuestionService,
    request: &HttpRequest,
    question_id: i64,
    req: CreateAnswerRequest,
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

    // 内容校验
    if let Err(msg) = validate_text(&req.content, QA_CONTENT_MAX_LEN) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            format!("答案内容不合法: {msg}"),
        )));
    }
    if let Err(msg) = validate_input(&req.content, "答案内容") {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    let storage = service.get_storage(request);

    // 问题必须存在
    let question = match storage.get_question_by_id(question_id).await {
        Ok(Some(question)) => question,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "问题不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询问题失败: {e}"),
                )),
            );
        }
    };

    // 通过作业定位课程，校验回答权限
    let assignment = match storage.get_assignment_by_id(question.assignment_id).await {
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

    let content = sanitize_input(req.content.trim());

    match storage.create_answer(user.id, question_id, content).await {
        Ok(answer) => Ok(HttpResponse::Created().json(ApiResponse::success(answer, "回答成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("回答失败: {e}"),
            )),
        ),
    }
}
