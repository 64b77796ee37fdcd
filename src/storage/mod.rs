use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    courses::{
        entities::{Course, Enrollment},
        requests::CreateCourseRequest,
    },
    files::entities::File,
    questions::entities::{Answer, Question},
    submissions::{
        entities::Submission,
        requests::CreateSubmissionRequest,
        responses::SubmissionListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
        responses::{ApprovalStatsResponse, UserListResponse},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 设置审批状态
    async fn set_user_allowed(&self, id: i64, allowed: bool) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;
    // 审批统计
    async fn get_approval_stats(&self) -> Result<ApprovalStatsResponse>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest, professor_id: i64)
    -> Result<Course>;
    // 通过课程代码获取课程（含副教授列表）
    async fn get_course_by_code(&self, course_code: &str) -> Result<Option<Course>>;
    // 列出教授的课程（主讲或副教授）
    async fn list_professor_courses(&self, professor_id: i64) -> Result<Vec<Course>>;
    // 列出学生选修的课程
    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>>;
    // 添加副教授
    async fn add_sub_professor(&self, course_code: &str, professor_id: i64) -> Result<()>;
    // 移除副教授
    async fn remove_sub_professor(&self, course_code: &str, professor_id: i64) -> Result<bool>;
    // 删除课程（级联清理作业/提交/问答/选课，单事务）
    async fn delete_course(&self, course_code: &str) -> Result<bool>;

    /// 选课管理方法
    // 学生选课
    async fn enroll_student(&self, student_id: i64, course_code: &str) -> Result<Enrollment>;
    // 学生是否已选该课
    async fn is_student_enrolled(&self, student_id: i64, course_code: &str) -> Result<bool>;
    // 列出课程学生
    async fn list_course_students(&self, course_code: &str) -> Result<Vec<User>>;
    // 将学生移出课程（先清理其提交与问答，单事务）
    async fn remove_student_from_course(&self, student_id: i64, course_code: &str) -> Result<()>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出课程作业
    async fn list_course_assignments(&self, course_code: &str) -> Result<Vec<Assignment>>;
    // 列出教授名下（主讲或副教授）所有课程的作业
    async fn list_assignments_for_professor(&self, professor_id: i64) -> Result<Vec<Assignment>>;
    // 列出学生所有选修课程的作业
    async fn list_assignments_for_student(&self, student_id: i64) -> Result<Vec<Assignment>>;
    // 更新作业
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业（级联清理提交/问答，单事务）
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;

    /// 提交管理方法
    // 创建提交（(assignment_id, student_id) 唯一索引兜底）
    async fn create_submission(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 获取某学生对某作业的提交
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 列出作业的全部提交（含提交人信息）
    async fn list_assignment_submissions(
        &self,
        assignment_id: i64,
    ) -> Result<SubmissionListResponse>;
    // 列出学生的全部提交
    async fn list_student_submissions(&self, student_id: i64) -> Result<Vec<Submission>>;
    // 列出学生在某课程内的提交（成绩单）
    async fn list_student_submissions_in_course(
        &self,
        student_id: i64,
        course_code: &str,
    ) -> Result<Vec<Submission>>;
    // 修改提交内容
    async fn update_submission_content(
        &self,
        submission_id: i64,
        content: String,
        file_token: Option<String>,
    ) -> Result<Option<Submission>>;
    // 评分（可重复，覆盖 score/feedback）
    async fn grade_submission(
        &self,
        submission_id: i64,
        score: i32,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;
    // 删除提交
    async fn delete_submission(&self, submission_id: i64) -> Result<bool>;

    /// 答疑管理方法
    // 学生提问
    async fn create_question(
        &self,
        student_id: i64,
        assignment_id: i64,
        content: String,
    ) -> Result<Question>;
    // 通过ID获取问题（含答案，按时间升序）
    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>>;
    // 列出作业全部问题
    async fn list_assignment_questions(&self, assignment_id: i64) -> Result<Vec<Question>>;
    // 列出某学生在某作业下的问题
    async fn list_student_assignment_questions(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Vec<Question>>;
    // 列出教授名下所有课程的问题
    async fn list_professor_questions(&self, professor_id: i64) -> Result<Vec<Question>>;
    // 教授回答问题
    async fn create_answer(
        &self,
        professor_id: i64,
        question_id: i64,
        content: String,
    ) -> Result<Answer>;

    /// 文件管理方法
    // 登记上传文件
    async fn create_file(
        &self,
        token: &str,
        file_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    // 通过唯一 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
