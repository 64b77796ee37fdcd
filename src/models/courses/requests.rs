use serde::Deserialize;

// 创建课程请求
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub course_code: String,
    pub course_name: String,
}

// 选课请求（学生凭课程代码加入）
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub course_code: String,
}
