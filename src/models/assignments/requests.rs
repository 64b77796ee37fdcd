use chrono::{DateTime, Utc};
use serde::Deserialize;

/// 创建作业请求
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub course_code: String,
    pub title: String,
    pub content: String,
    pub due_at: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
}

/// 更新作业请求
#[derive(Debug, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
}

/// 作业列表查询参数
#[derive(Debug, Deserialize)]
pub struct AssignmentListParams {
    pub course_code: Option<String>,
    // 学生视角：仅未提交的作业
    #[serde(default)]
    pub unsubmitted_only: bool,
}
