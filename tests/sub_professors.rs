//! 副教授关系属性测试

mod common;

use common::{create_course, create_user, setup_storage};
use rust_coursehub::models::users::entities::UserRole;
use rust_coursehub::services::permissions::{has_permission_for_course, is_main_professor};
use rust_coursehub::storage::Storage;

#[tokio::test]
async fn joining_as_sub_professor_grants_permission() {
    let storage = setup_storage().await;

    let p1 = create_user(&storage, "prof_main", UserRole::Professor).await;
    let p2 = create_user(&storage, "prof_side", UserRole::Professor).await;

    create_course(&storage, "CS101", p1.id).await;

    // 加入前没有任何权限
    let before = storage.get_course_by_code("CS101").await.unwrap().unwrap();
    assert!(!has_permission_for_course(Some(&p2), Some(&before)));

    storage.add_sub_professor("CS101", p2.id).await.unwrap();

    // 加入后获得管理权限，但不是主讲
    let after = storage.get_course_by_code("CS101").await.unwrap().unwrap();
    assert!(after.sub_professors.contains(&p2.id));
    assert!(has_permission_for_course(Some(&p2), Some(&after)));
    assert!(!is_main_professor(Some(&p2), Some(&after)));
    assert!(is_main_professor(Some(&p1), Some(&after)));
}

#[tokio::test]
async fn duplicate_sub_professor_registration_is_rejected() {
    let storage = setup_storage().await;

    let p1 = create_user(&storage, "prof_owner", UserRole::Professor).await;
    let p2 = create_user(&storage, "prof_joiner", UserRole::Professor).await;

    create_course(&storage, "SEC700", p1.id).await;
    storage.add_sub_professor("SEC700", p2.id).await.unwrap();

    let again = storage.add_sub_professor("SEC700", p2.id).await;
    match again {
        Err(e) => assert!(e.is_already_exists()),
        Ok(_) => panic!("duplicate sub professor registration must be rejected"),
    }
}

#[tokio::test]
async fn leaving_removes_only_listed_sub_professor() {
    let storage = setup_storage().await;

    let p1 = create_user(&storage, "prof_stay", UserRole::Professor).await;
    let p2 = create_user(&storage, "prof_leave", UserRole::Professor).await;

    create_course(&storage, "PL800", p1.id).await;
    storage.add_sub_professor("PL800", p2.id).await.unwrap();

    assert!(storage.remove_sub_professor("PL800", p2.id).await.unwrap());

    let course = storage.get_course_by_code("PL800").await.unwrap().unwrap();
    assert!(course.sub_professors.is_empty());
    // 主讲教授仍在
    assert_eq!(course.professor_id, p1.id);

    // 不在名单里的移除请求不产生任何效果
    assert!(!storage.remove_sub_professor("PL800", p2.id).await.unwrap());
    assert!(!storage.remove_sub_professor("PL800", p1.id).await.unwrap());
}
