use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    // 课程代码（主键，统一大写）
    pub course_code: String,
    // 课程名称
    pub course_name: String,
    // 主讲教授ID（课程创建者）
    pub professor_id: i64,
    // 副教授ID集合（顺序无关）
    pub sub_professors: Vec<i64>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    /// 指定教授是否在副教授列表中
    pub fn has_sub_professor(&self, professor_id: i64) -> bool {
        self.sub_professors.contains(&professor_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: i64,
    pub course_code: String,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
