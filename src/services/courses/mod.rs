pub mod create;
pub mod delete;
pub mod detail;
pub mod enroll;
pub mod list;
pub mod students;
pub mod sub_professors;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{CreateCourseRequest, EnrollRequest};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    // 创建课程（教授）
    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, course_data).await
    }

    // 列出自己的课程（教授：主讲或副教授；学生：已选）
    pub async fn list_my_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_my_courses(self, request).await
    }

    // 课程详情
    pub async fn get_course_detail(
        &self,
        request: &HttpRequest,
        course_code: String,
    ) -> ActixResult<HttpResponse> {
        detail::get_course_detail(self, request, course_code).await
    }

    // 删除课程（仅主讲教授）
    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_code: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_code).await
    }

    // 以副教授身份加入课程
    pub async fn join_as_sub_professor(
        &self,
        request: &HttpRequest,
        course_code: String,
    ) -> ActixResult<HttpResponse> {
        sub_professors::join_as_sub_professor(self, request, course_code).await
    }

    // 以副教授身份退出课程
    pub async fn leave_as_sub_professor(
        &self,
        request: &HttpRequest,
        course_code: String,
    ) -> ActixResult<HttpResponse> {
        sub_professors::leave_as_sub_professor(self, request, course_code).await
    }

    // 学生选课
    pub async fn enroll(
        &self,
        request: &HttpRequest,
        enroll_data: EnrollRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll(self, request, enroll_data).await
    }

    // 列出课程学生
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        course_code: String,
    ) -> ActixResult<HttpResponse> {
        students::list_students(self, request, course_code).await
    }

    // 将学生移出课程
    pub async fn remove_student(
        &self,
        request: &HttpRequest,
        course_code: String,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        students::remove_student(self, request, course_code, student_id).await
    }
}
