use serde::{Deserialize, Serialize};

// 提交状态
// NotSubmitted -> Submitted -> (Modified)* -> Graded
// NotSubmitted 不落库（无记录即未提交）；Graded 即 score 已写入
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted, // 已提交（含修改后）
    Graded,    // 已评分
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "submitted" => Ok(SubmissionStatus::Submitted),
            "graded" => Ok(SubmissionStatus::Graded),
            _ => Err(serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: submitted, graded"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::Graded => write!(f, "graded"),
        }
    }
}

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: String,
    // 上传附件的下载 token
    pub file_token: Option<String>,
    pub score: Option<i32>,
    pub feedback: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
