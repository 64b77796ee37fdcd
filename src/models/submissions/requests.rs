use serde::Deserialize;

/// 创建提交请求
#[derive(Debug, Deserialize)]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub content: String,
    // 预先通过文件接口上传得到的 token
    pub file_token: Option<String>,
}

/// 修改提交请求
#[derive(Debug, Deserialize)]
pub struct UpdateSubmissionRequest {
    pub content: String,
    pub file_token: Option<String>,
}

/// 评分请求
#[derive(Debug, Deserialize)]
pub struct GradeSubmissionRequest {
    pub score: i32,
    pub feedback: Option<String>,
}
