use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode},
};

/// 以副教授身份加入课程
///
/// 冲突情形：课程不存在 / 已是主讲教授 / 已是副教授。
pub async fn join_as_sub_professor(
    service: &CourseService,
    request: &HttpRequest,
    course_code: String,
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

    let course = match storage.get_course_by_code(&course_code).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "不存在的课程代码",
            )));
        }
        Err(e) => {
            error!("Error getting course by code: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询课程失败: {e}"),
                )),
            );
        }
    };

    // 已是主讲教授
    if course.professor_id == user_id {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AlreadyMainProfessor,
            "已是该课程的主讲教授",
        )));
    }

    // 已是副教授
    if course.has_sub_professor(user_id) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AlreadySubProfessor,
            "已是该课程的副教授",
        )));
    }

    match storage.add_sub_professor(&course_code, user_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("已加入课程（副教授）"))),
        // 并发下唯一约束兜底
        Err(e) if e.is_already_exists() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::AlreadySubProfessor, "已是该课程的副教授"),
        )),
        Err(e) => {
            error!("Error joining course as sub professor: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to join course",
                )),
            )
        }
    }
}

/// 以副教授身份退出课程
///
/// 仅当前列在副教授名单中才可退出；主讲教授不能经由此路径离开课程，
/// 想撤掉课程只能走删除。
pub async fn leave_as_sub_professor(
    service: &CourseService,
    request: &HttpRequest,
    course_code: String,
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

    let course = match storage.get_course_by_code(&course_code).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            error!("Error getting course by code: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询课程失败: {e}"),
                )),
            );
        }
    };

    // 主讲教授不可退出自己的课程
    if course.professor_id == user_id {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::NotSubProfessor,
            "主讲教授不能退出课程，请删除课程",
        )));
    }

    if !course.has_sub_professor(user_id) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::NotSubProfessor,
            "不是该课程的副教授",
        )));
    }

    match storage.remove_sub_professor(&course_code, user_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("已退出课程"))),
        Ok(false) => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::NotSubProfessor,
            "不是该课程的副教授",
        ))),
        Err(e) => {
            error!("Error leaving course: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to leave course",
                )),
            )
        }
    }
}
