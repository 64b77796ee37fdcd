//! 业务数据模型
//!
//! 按领域划分为 entities / requests / responses 三类，
//! common 中是统一的响应封装与分页类型。

pub mod common;

pub mod assignments;
pub mod auth;
pub mod courses;
pub mod files;
pub mod questions;
pub mod submissions;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间（用于运行统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 响应体中的 code 字段。0 表示成功，其余按领域分段：
/// 1xxx 认证 / 2xxx 用户 / 3xxx 课程与选课 / 4xxx 作业 /
/// 5xxx 提交与评分 / 6xxx 答疑 / 7xxx 文件 / 9xxx 通用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 认证
    Unauthorized = 1001,
    AuthFailed = 1002,
    AccountNotApproved = 1003,
    Forbidden = 1004,
    TokenInvalid = 1005,
    RateLimitExceeded = 1006,

    // 用户
    UserNotFound = 2001,
    UserNameAlreadyExists = 2002,
    UserEmailAlreadyExists = 2003,
    UserNameInvalid = 2004,
    UserEmailInvalid = 2005,
    PasswordTooWeak = 2006,
    RegisterFailed = 2007,
    RoleInvalid = 2008,

    // 课程与选课
    CourseNotFound = 3001,
    CourseCodeInvalid = 3002,
    CourseCodeAlreadyExists = 3003,
    CoursePermissionDenied = 3004,
    CourseDeleteFailed = 3005,
    AlreadyMainProfessor = 3006,
    AlreadySubProfessor = 3007,
    NotSubProfessor = 3008,
    AlreadyEnrolled = 3009,
    NotEnrolled = 3010,

    // 作业
    AssignmentNotFound = 4001,
    AssignmentDeadlinePassed = 4002,
    AssignmentDeadlineInvalid = 4003,

    // 提交与评分
    SubmissionNotFound = 5001,
    AlreadySubmitted = 5002,
    ScoreOutOfRange = 5003,
    NotSubmissionOwner = 5004,

    // 答疑
    QuestionNotFound = 6001,

    // 文件
    FileNotFound = 7001,
    FileSizeExceeded = 7002,
    FileTypeNotAllowed = 7003,
    FileUploadFailed = 7004,
    MultifileUploadNotAllowed = 7005,

    // 通用
    BadRequest = 9001,
    ValidationError = 9002,
    InternalServerError = 9999,
}
