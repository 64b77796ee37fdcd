use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::UserQueryParams;
use crate::services::UserService;
use crate::utils::SafeIDI64;

// 懒加载的全局 USER_SERVICE 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// HTTP处理程序
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserQueryParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(&req, query.into_inner()).await
}

pub async fn approve_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.approve_user(&req, user_id.0).await
}

pub async fn revoke_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.revoke_user(&req, user_id.0).await
}

pub async fn delete_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(&req, user_id.0).await
}

pub async fn get_approval_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_approval_stats(&req).await
}

// 配置路由（用户管理为管理员专属）
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_users)))
            .service(web::resource("/stats").route(web::get().to(get_approval_stats)))
            .service(
                web::resource("/{id}")
                    // 拒绝待审批账号
                    .route(web::delete().to(delete_user)),
            )
            .service(web::resource("/{id}/approve").route(web::patch().to(approve_user)))
            .service(web::resource("/{id}/revoke").route(web::patch().to(revoke_user))),
    );
}
