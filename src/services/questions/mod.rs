pub mod answer;
pub mod ask;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::questions::requests::{CreateAnswerRequest, CreateQuestionRequest};
use crate::storage::Storage;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuestionService {
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

    // 学生提问
    pub async fn ask_question(
        &self,
        request: &HttpRequest,
        req: CreateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        ask::ask_question(self, request, req).await
    }

    // 列出作业下的问题（学生：自己的；教授：全部）
    pub async fn list_assignment_questions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_assignment_questions(self, request, assignment_id).await
    }

    // 教授视角：名下课程的全部问题
    pub async fn list_my_questions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_questions(self, request).await
    }

    // 教授回答问题
    pub async fn answer_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
        req: CreateAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        answer::answer_question(self, request, question_id, req).await
    }
}
