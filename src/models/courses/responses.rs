use serde::{Deserialize, Serialize};

use crate::models::assignments::entities::Assignment;
use crate::models::courses::entities::Course;
use crate::models::users::entities::User;

// 课程列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseListResponse {
    pub items: Vec<Course>,
}

// 课程详情响应
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseDetailResponse {
    pub course: Course,
    pub students: Vec<User>,
    pub assignments: Vec<Assignment>,
    pub student_count: i64,
    pub assignment_count: i64,
    // 请求者是否为主讲教授（决定删除/成员管理入口）
    pub is_main_professor: bool,
}

// 课程学生列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct CourseStudentsResponse {
    pub course_code: String,
    pub students: Vec<User>,
}
