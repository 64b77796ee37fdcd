use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest},
    utils::sanitize::{sanitize_input, validate_input},
    utils::validate::{COURSE_NAME_MAX_LEN, validate_course_code, validate_text},
};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    mut course_data: CreateCourseRequest,
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

    // 课程名称校验
    if let Err(msg) = validate_text(&course_data.course_name, COURSE_NAME_MAX_LEN) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            format!("课程名称不合法: {msg}"),
        )));
    }
    if let Err(msg) = validate_input(&course_data.course_name, "课程名称") {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationError, msg)));
    }

    // 课程代码校验，统一大写
    let code = course_data.course_code.trim().to_uppercase();
    if let Err(msg) = validate_course_code(&code) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CourseCodeInvalid, msg)));
    }

    course_data.course_code = code;
    course_data.course_name = sanitize_input(course_data.course_name.trim());

    let storage = service.get_storage(request);

    match storage.create_course(course_data, user_id).await {
        Ok(course) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "课程创建成功")))
        }
        Err(e) if e.is_already_exists() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::CourseCodeAlreadyExists, "课程代码已被使用"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建课程失败: {e}"),
            )),
        ),
    }
}
