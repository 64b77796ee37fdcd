//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod courses;
mod enrollments;
mod files;
mod questions;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{CourseHubError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 使用指定连接参数创建存储实例（测试亦通过此入口）
    pub async fn new_with_url(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CourseHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn set_user_allowed(&self, id: i64, allowed: bool) -> Result<bool> {
        self.set_user_allowed_impl(id, allowed).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn get_approval_stats(&self) -> Result<ApprovalStatsResponse> {
        self.get_approval_stats_impl().await
    }

    // 课程模块
    async fn create_course(
        &self,
        course: CreateCourseRequest,
        professor_id: i64,
    ) -> Result<Course> {
        self.create_course_impl(course, professor_id).await
    }

    async fn get_course_by_code(&self, course_code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(course_code).await
    }

    async fn list_professor_courses(&self, professor_id: i64) -> Result<Vec<Course>> {
        self.list_professor_courses_impl(professor_id).await
    }

    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<Course>> {
        self.list_student_courses_impl(student_id).await
    }

    async fn add_sub_professor(&self, course_code: &str, professor_id: i64) -> Result<()> {
        self.add_sub_professor_impl(course_code, professor_id).await
    }

    async fn remove_sub_professor(&self, course_code: &str, professor_id: i64) -> Result<bool> {
        self.remove_sub_professor_impl(course_code, professor_id)
            .await
    }

    async fn delete_course(&self, course_code: &str) -> Result<bool> {
        self.delete_course_impl(course_code).await
    }

    // 选课模块
    async fn enroll_student(&self, student_id: i64, course_code: &str) -> Result<Enrollment> {
        self.enroll_student_impl(student_id, course_code).await
    }

    async fn is_student_enrolled(&self, student_id: i64, course_code: &str) -> Result<bool> {
        self.is_student_enrolled_impl(student_id, course_code).await
    }

    async fn list_course_students(&self, course_code: &str) -> Result<Vec<User>> {
        self.list_course_students_impl(course_code).await
    }

    async fn remove_student_from_course(&self, student_id: i64, course_code: &str) -> Result<()> {
        self.remove_student_from_course_impl(student_id, course_code)
            .await
    }

    // 作业模块
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(req).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_course_assignments(&self, course_code: &str) -> Result<Vec<Assignment>> {
        self.list_course_assignments_impl(course_code).await
    }

    async fn list_assignments_for_professor(&self, professor_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_for_professor_impl(professor_id).await
    }

    async fn list_assignments_for_student(&self, student_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_for_student_impl(student_id).await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.create_submission_impl(student_id, req).await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await
    }

    async fn list_assignment_submissions(
        &self,
        assignment_id: i64,
    ) -> Result<SubmissionListResponse> {
        self.list_assignment_submissions_impl(assignment_id).await
    }

    async fn list_student_submissions(&self, student_id: i64) -> Result<Vec<Submission>> {
        self.list_student_submissions_impl(student_id).await
    }

    async fn list_student_submissions_in_course(
        &self,
        student_id: i64,
        course_code: &str,
    ) -> Result<Vec<Submission>> {
        self.list_student_submissions_in_course_impl(student_id, course_code)
            .await
    }

    async fn update_submission_content(
        &self,
        submission_id: i64,
        content: String,
        file_token: Option<String>,
    ) -> Result<Option<Submission>> {
        self.update_submission_content_impl(submission_id, content, file_token)
            .await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        score: i32,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        self.grade_submission_impl(submission_id, score, feedback)
            .await
    }

    async fn delete_submission(&self, submission_id: i64) -> Result<bool> {
        self.delete_submission_impl(submission_id).await
    }

    // 答疑模块
    async fn create_question(
        &self,
        student_id: i64,
        assignment_id: i64,
        content: String,
    ) -> Result<Question> {
        self.create_question_impl(student_id, assignment_id, content)
            .await
    }

    async fn get_question_by_id(&self, question_id: i64) -> Result<Option<Question>> {
        self.get_question_by_id_impl(question_id).await
    }

    async fn list_assignment_questions(&self, assignment_id: i64) -> Result<Vec<Question>> {
        self.list_assignment_questions_impl(assignment_id).await
    }

    async fn list_student_assignment_questions(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Vec<Question>> {
        self.list_student_assignment_questions_impl(assignment_id, student_id)
            .await
    }

    async fn list_professor_questions(&self, professor_id: i64) -> Result<Vec<Question>> {
        self.list_professor_questions_impl(professor_id).await
    }

    async fn create_answer(
        &self,
        professor_id: i64,
        question_id: i64,
        content: String,
    ) -> Result<Answer> {
        self.create_answer_impl(professor_id, question_id, content)
            .await
    }

    // 文件模块
    async fn create_file(
        &self,
        token: &str,
        file_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        self.create_file_impl(token, file_name, file_size, file_type, user_id)
            .await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(token).await
    }
}
