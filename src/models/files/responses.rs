use serde::{Deserialize, Serialize};

// 文件上传响应
#[derive(Debug, Serialize, Deserialize)]
pub struct FileUploadResponse {
    pub token: String,
    pub file_name: String,
    pub size: i64,
    pub content_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
