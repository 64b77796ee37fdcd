pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    // 创建作业
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, req).await
    }

    // 列出作业（按课程或按身份）
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    // 作业详情
    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, assignment_id).await
    }

    // 更新作业
    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, assignment_id, req).await
    }

    // 删除作业
    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }
}
