use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, questions::requests::CreateQuestionRequest},
    utils::sanitize::{sanitize_input, validate_input},
    utils::validate::{QA_CONTENT_MAX_LEN, validate_text},
};

/// 学生就作业提问（需已选课）
pub async fn ask_question(
    service: &QuestionService,
    request: &HttpRequest,
    req: CreateQuestionRequest,
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
    if let Err(msg) = validate_text(&req.content, QA_CONTENT_MAX_LEN) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            format!("问题内容不合法: {msg}"),
        )));
    }
    if let Err(msg) = validate_input(&req.content, "问题内容") {
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

    let content = sanitize_input(req.content.trim());

    match storage
        .create_question(user_id, req.assignment_id, content)
        .await
    {
        Ok(question) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(question, "提问成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("提问失败: {e}"),
            )),
        ),
    }
}
