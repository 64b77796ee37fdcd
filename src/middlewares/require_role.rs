/*!
 * 路由级角色门禁
 *
 * 必须挂在 RequireJWT 之后，从请求扩展里读已认证用户的角色。
 *
 * ```rust,ignore
 * .wrap(RequireRole::new(&UserRole::Admin))                 // 恰好此角色
 * .wrap(RequireRole::new_any(UserRole::professor_roles()))  // 任一角色即可
 * ```
 *
 * 这里只挡角色这一层。主讲/副教授这类跟具体课程绑定的权限
 * 要查库才能判定，统一放在 `services::permissions`。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required_roles: Vec<UserRole>,
    // true: 必须匹配全部列出的角色；false: 命中任意一个即可
    require_all: bool,
}

impl RequireRole {
    /// 要求恰好某个角色
    pub fn new(role: &UserRole) -> Self {
        Self {
            required_roles: vec![role.clone()],
            require_all: true,
        }
    }

    /// 要求列出角色中的任意一个
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            required_roles: roles.iter().map(|r| (*r).clone()).collect(),
            require_all: false,
        }
    }

    fn allows(&self, role: &UserRole) -> bool {
        if self.require_all {
            self.required_roles.iter().all(|r| r == role)
        } else {
            self.required_roles.iter().any(|r| r == role)
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            gate: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    gate: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let gate = self.gate.clone();

        Box::pin(async move {
            let user = req.extensions().get::<User>().cloned();

            match user {
                Some(user) if gate.allows(&user.role) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(user) => {
                    info!(
                        "Access denied for user {} (role: {}). Required roles: {:?}",
                        user.id, user.role, gate.required_roles
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied.",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check failed: no authenticated user in request. Is RequireJWT applied first?"
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
