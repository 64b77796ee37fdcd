use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, GradeSubmissionRequest, UpdateSubmissionRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::{SafeCourseCode, SafeIDI64};

// 懒加载的全局 SUBMISSION_SERVICE 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 提交作业
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, body.into_inner())
        .await
}

// 提交详情
pub async fn get_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, path.0).await
}

// 修改提交
pub async fn update_submission(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_submission(&req, path.0, body.into_inner())
        .await
}

// 撤回提交
pub async fn delete_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.delete_submission(&req, path.0).await
}

// 评分
pub async fn grade_submission(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(&req, path.0, body.into_inner())
        .await
}

// 作业的全部提交（教授）
pub async fn list_assignment_submissions(
    req: HttpRequest,
    path: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_assignment_submissions(&req, path.0)
        .await
}

// 当前学生对某作业的提交
pub async fn get_my_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_my_submission(&req, path.0).await
}

// 学生在某课程内的成绩单
pub async fn get_course_grades(
    req: HttpRequest,
    course_code: SafeCourseCode,
    student_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_course_grades(&req, course_code.0, student_id.0)
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_submission)
                        // 仅学生提交作业
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{id}")
                    // 详情：提交者本人或课程教授（业务层校验）
                    .route(web::get().to(get_submission))
                    .route(
                        web::put()
                            .to(update_submission)
                            .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                    )
                    .route(
                        web::delete()
                            .to(delete_submission)
                            .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                    ),
            )
            .service(
                web::resource("/{id}/grade").route(
                    web::post()
                        .to(grade_submission)
                        // 评分：教授与管理员（课程权限在业务层校验）
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::professor_roles(),
                        )),
                ),
            ),
    );
}
