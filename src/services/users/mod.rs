pub mod approve;
pub mod delete;
pub mod list;
pub mod stats;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::UserQueryParams;
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        self.storage.clone().unwrap_or_else(|| {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        })
    }

    // 列出用户（管理员）
    pub async fn list_users(
        &self,
        request: &HttpRequest,
        query: UserQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, request, query).await
    }

    // 审批通过
    pub async fn approve_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        approve::set_allowed(self, request, user_id, true).await
    }

    // 撤销审批
    pub async fn revoke_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        approve::set_allowed(self, request, user_id, false).await
    }

    // 删除用户（拒绝待审批账号）
    pub async fn delete_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, request, user_id).await
    }

    // 审批统计
    pub async fn get_approval_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stats::get_approval_stats(self, request).await
    }
}
