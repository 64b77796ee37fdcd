pub mod create;
pub mod delete;
pub mod detail;
pub mod grade;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{
    CreateSubmissionRequest, GradeSubmissionRequest, UpdateSubmissionRequest,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    // 学生提交作业
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, req).await
    }

    // 提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    // 当前学生对某作业的提交
    pub async fn get_my_submission(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_my_submission(self, request, assignment_id).await
    }

    // 修改提交
    pub async fn update_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        req: UpdateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_submission(self, request, submission_id, req).await
    }

    // 删除提交
    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, submission_id).await
    }

    // 评分
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        req: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, req).await
    }

    // 列出作业的全部提交（教授）
    pub async fn list_assignment_submissions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_assignment_submissions(self, request, assignment_id).await
    }

    // 学生在某课程内的成绩单
    pub async fn get_course_grades(
        &self,
        request: &HttpRequest,
        course_code: String,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_course_grades(self, request, course_code, student_id).await
    }
}
