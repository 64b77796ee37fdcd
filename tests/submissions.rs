//! 提交唯一性与评分属性测试

mod common;

use common::{create_assignment, create_course, create_user, setup_storage};
use rust_coursehub::models::submissions::entities::SubmissionStatus;
use rust_coursehub::models::submissions::requests::CreateSubmissionRequest;
use rust_coursehub::models::users::entities::UserRole;
use rust_coursehub::storage::Storage;

#[tokio::test]
async fn second_submission_for_same_pair_is_rejected() {
    let storage = setup_storage().await;

    let professor = create_user(&storage, "prof_park", UserRole::Professor).await;
    let student = create_user(&storage, "student_b", UserRole::Student).await;

    create_course(&storage, "OS400", professor.id).await;
    storage.enroll_student(student.id, "OS400").await.unwrap();
    let assignment = create_assignment(&storage, "OS400").await;

    let first = storage
        .create_submission(
            student.id,
            CreateSubmissionRequest {
                assignment_id: assignment.id,
                content: "answer text".to_string(),
                file_token: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(first.status, SubmissionStatus::Submitted);

    // 唯一索引把第二次提交挡下来，报告为冲突而不是悄悄写入第二行
    let second = storage
        .create_submission(
            student.id,
            CreateSubmissionRequest {
                assignment_id: assignment.id,
                content: "double submit".to_string(),
                file_token: None,
            },
        )
        .await;
    match second {
        Err(e) => assert!(e.is_already_exists()),
        Ok(_) => panic!("duplicate submission must be rejected"),
    }

    // 原始提交未被覆盖
    let stored = storage
        .get_submission_by_assignment_and_student(assignment.id, student.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.content, "answer text");
}

#[tokio::test]
async fn grading_overwrites_score_and_keeps_content() {
    let storage = setup_storage().await;

    let professor = create_user(&storage, "prof_han", UserRole::Professor).await;
    let student = create_user(&storage, "student_c", UserRole::Student).await;

    create_course(&storage, "NET500", professor.id).await;
    storage.enroll_student(student.id, "NET500").await.unwrap();
    let assignment = create_assignment(&storage, "NET500").await;

    let submission = storage
        .create_submission(
            student.id,
            CreateSubmissionRequest {
                assignment_id: assignment.id,
                content: "original".to_string(),
                file_token: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(submission.status, SubmissionStatus::Submitted);
    assert!(submission.score.is_none());

    // 边界分数 0 和 100 都是合法值
    let graded = storage
        .grade_submission(submission.id, 0, Some("needs work".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(graded.score, Some(0));
    assert_eq!(graded.status, SubmissionStatus::Graded);
    assert_eq!(graded.content, "original");

    // 重复评分覆盖旧的分数与评语
    let regraded = storage
        .grade_submission(submission.id, 100, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(regraded.score, Some(100));
    assert!(regraded.feedback.is_none());
    assert_eq!(regraded.content, "original");
}

#[tokio::test]
async fn duplicate_enrollment_is_rejected() {
    let storage = setup_storage().await;

    let professor = create_user(&storage, "prof_yoon", UserRole::Professor).await;
    let student = create_user(&storage, "student_d", UserRole::Student).await;

    create_course(&storage, "AI600", professor.id).await;
    storage.enroll_student(student.id, "AI600").await.unwrap();

    let again = storage.enroll_student(student.id, "AI600").await;
    match again {
        Err(e) => assert!(e.is_already_exists()),
        Ok(_) => panic!("duplicate enrollment must be rejected"),
    }
}
