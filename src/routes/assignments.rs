use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ASSIGNMENT_SERVICE 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 列出作业
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, body.into_inner())
        .await
}

// 获取作业详情
pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, path.0).await
}

// 更新作业
pub async fn update_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, path.0, body.into_inner())
        .await
}

// 删除作业
pub async fn delete_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, path.0).await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出作业 - 所有登录用户可访问（业务层按身份过滤）
                    .route(web::get().to(list_assignments))
                    // 创建作业 - 仅教授和管理员
                    .route(
                        web::post().to(create_assignment).wrap(
                            middlewares::RequireRole::new_any(UserRole::professor_roles()),
                        ),
                    ),
            )
            .service(
                web::resource("/{id}")
                    // 获取作业详情 - 业务层校验课程权限/选课资格
                    .route(web::get().to(get_assignment))
                    // 更新作业 - 仅教授和管理员
                    .route(
                        web::put().to(update_assignment).wrap(
                            middlewares::RequireRole::new_any(UserRole::professor_roles()),
                        ),
                    )
                    // 删除作业 - 仅教授和管理员
                    .route(
                        web::delete().to(delete_assignment).wrap(
                            middlewares::RequireRole::new_any(UserRole::professor_roles()),
                        ),
                    ),
            )
            .service(
                web::resource("/{id}/submissions").route(
                    web::get()
                        .to(super::submissions::list_assignment_submissions)
                        // 作业的全部提交：主讲/副教授（业务层校验课程权限）
                        .wrap(middlewares::RequireRole::new_any(
                            UserRole::professor_roles(),
                        )),
                ),
            )
            .service(
                web::resource("/{id}/submissions/my").route(
                    web::get()
                        .to(super::submissions::get_my_submission)
                        // 学生查询自己对该作业的提交
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                // 作业下的问题列表：学生看自己的，教授看全部（业务层区分）
                web::resource("/{id}/questions")
                    .route(web::get().to(super::questions::list_assignment_questions)),
            ),
    );
}
