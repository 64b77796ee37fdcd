//! 集成测试公共设施
//!
//! 每个测试用例使用独立的内存 SQLite 数据库，迁移在连接时自动执行。

use rust_coursehub::models::assignments::entities::Assignment;
use rust_coursehub::models::assignments::requests::CreateAssignmentRequest;
use rust_coursehub::models::courses::entities::Course;
use rust_coursehub::models::courses::requests::CreateCourseRequest;
use rust_coursehub::models::users::entities::{User, UserRole};
use rust_coursehub::models::users::requests::CreateUserRequest;
use rust_coursehub::storage::Storage;
use rust_coursehub::storage::sea_orm_storage::SeaOrmStorage;

pub async fn setup_storage() -> SeaOrmStorage {
    SeaOrmStorage::new_with_url(":memory:", 1, 5)
        .await
        .expect("failed to create in-memory storage")
}

pub async fn create_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            // 测试不经过登录，直接塞一个占位哈希
            password: "$argon2id$test-hash".to_string(),
            role,
            display_name: None,
        })
        .await
        .expect("failed to create user")
}

pub async fn create_course(storage: &SeaOrmStorage, code: &str, professor_id: i64) -> Course {
    storage
        .create_course(
            CreateCourseRequest {
                course_code: code.to_string(),
                course_name: format!("{code} course"),
            },
            professor_id,
        )
        .await
        .expect("failed to create course")
}

pub async fn create_assignment(storage: &SeaOrmStorage, course_code: &str) -> Assignment {
    storage
        .create_assignment(CreateAssignmentRequest {
            course_code: course_code.to_string(),
            title: "hw1".to_string(),
            content: "do the exercises".to_string(),
            due_at: Some(chrono::Utc::now() + chrono::Duration::days(7)),
        })
        .await
        .expect("failed to create assignment")
}
