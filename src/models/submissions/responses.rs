use serde::{Deserialize, Serialize};

use crate::models::submissions::entities::Submission;

// 提交人信息（教授视角列表用）
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionStudent {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
}

// 作业提交列表项
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionListItem {
    #[serde(flatten)]
    pub submission: Submission,
    pub student: SubmissionStudent,
}

// 作业提交列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
}

// 学生在某课程内的成绩单
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseGradesResponse {
    pub course_code: String,
    pub student_id: i64,
    pub submissions: Vec<Submission>,
}
