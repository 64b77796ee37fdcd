use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::services::permissions::has_permission_for_course;
use crate::{
    middlewares::RequireJWT,
    models::{
        ApiResponse, ErrorCode,
        assignments::{requests::AssignmentListParams, responses::AssignmentListResponse},
        users::entities::UserRole,
    },
};

/// 列出作业
///
/// - 指定 course_code：主讲/副教授或已选课学生可见
/// - 未指定：教授返回名下课程的全部作业，学生返回已选课程的作业
///   （可用 unsubmitted_only 过滤掉已提交的）
pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListParams,
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

    let assignments = if let Some(ref raw_code) = query.course_code {
        let course_code = raw_code.trim().to_uppercase();

        let course = match storage.get_course_by_code(&course_code).await {
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

        // 访问权限
        let permitted = match user.role {
            UserRole::Admin => true,
            UserRole::Professor => has_permission_for_course(Some(&user), Some(&course)),
            UserRole::Student => {
                match storage.is_student_enrolled(user.id, &course_code).await {
                    Ok(enrolled) => enrolled,
                    Err(e) => {
                        return Ok(HttpResponse::InternalServerError().json(
                            ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                format!("查询选课记录失败: {e}"),
                            ),
                        ));
                    }
                }
            }
        };

        if !permitted {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::CoursePermissionDenied,
                "You do not have access to this course",
            )));
        }

        storage.list_course_assignments(&course_code).await
    } else {
        match user.role {
            UserRole::Student => storage.list_assignments_for_student(user.id).await,
            UserRole::Professor | UserRole::Admin => {
                storage.list_assignments_for_professor(user.id).await
            }
        }
    };

    let mut items = match assignments {
        Ok(items) => items,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业列表失败: {e}"),
                )),
            );
        }
    };

    // 学生视角：仅保留未提交的作业
    if query.unsubmitted_only && user.role == UserRole::Student {
        let submitted: HashSet<i64> = match storage.list_student_submissions(user.id).await {
            Ok(submissions) => submissions.into_iter().map(|s| s.assignment_id).collect(),
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询提交记录失败: {e}"),
                    )),
                );
            }
        };
        items.retain(|a| !submitted.contains(&a.id));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentListResponse { items },
        "查询成功",
    )))
}
