//! 级联删除属性测试
//!
//! 删除课程/作业/学生之后，不允许留下任何引用它们的子行。

mod common;

use common::{create_assignment, create_course, create_user, setup_storage};
use rust_coursehub::models::submissions::requests::CreateSubmissionRequest;
use rust_coursehub::models::users::entities::UserRole;
use rust_coursehub::storage::Storage;

#[tokio::test]
async fn deleting_course_removes_all_dependent_rows() {
    let storage = setup_storage().await;

    let professor = create_user(&storage, "prof_kim", UserRole::Professor).await;
    let s1 = create_user(&storage, "student_one", UserRole::Student).await;
    let s2 = create_user(&storage, "student_two", UserRole::Student).await;

    create_course(&storage, "CS101", professor.id).await;
    storage.enroll_student(s1.id, "CS101").await.unwrap();
    storage.enroll_student(s2.id, "CS101").await.unwrap();

    let assignment = create_assignment(&storage, "CS101").await;

    // 一个作业、两份提交、一个问题、一个答案
    let sub1 = storage
        .create_submission(
            s1.id,
            CreateSubmissionRequest {
                assignment_id: assignment.id,
                content: "answer one".to_string(),
                file_token: None,
            },
        )
        .await
        .unwrap();
    let sub2 = storage
        .create_submission(
            s2.id,
            CreateSubmissionRequest {
                assignment_id: assignment.id,
                content: "answer two".to_string(),
                file_token: None,
            },
        )
        .await
        .unwrap();

    let question = storage
        .create_question(s1.id, assignment.id, "why though".to_string())
        .await
        .unwrap();
    storage
        .create_answer(professor.id, question.id, "because".to_string())
        .await
        .unwrap();

    assert!(storage.delete_course("CS101").await.unwrap());

    // 课程本身与全部子行都不复存在
    assert!(storage.get_course_by_code("CS101").await.unwrap().is_none());
    assert!(
        storage
            .get_assignment_by_id(assignment.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .get_submission_by_id(sub1.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .get_submission_by_id(sub2.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .get_question_by_id(question.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(!storage.is_student_enrolled(s1.id, "CS101").await.unwrap());
    assert!(!storage.is_student_enrolled(s2.id, "CS101").await.unwrap());
    assert!(
        storage
            .list_course_assignments("CS101")
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        storage
            .list_course_students("CS101")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn deleting_assignment_removes_submissions_and_questions_only() {
    let storage = setup_storage().await;

    let professor = create_user(&storage, "prof_lee", UserRole::Professor).await;
    let student = create_user(&storage, "student_a", UserRole::Student).await;

    create_course(&storage, "ML200", professor.id).await;
    storage.enroll_student(student.id, "ML200").await.unwrap();

    let assignment = create_assignment(&storage, "ML200").await;
    let survivor = create_assignment(&storage, "ML200").await;

    let submission = storage
        .create_submission(
            student.id,
            CreateSubmissionRequest {
                assignment_id: assignment.id,
                content: "my work".to_string(),
                file_token: None,
            },
        )
        .await
        .unwrap();
    let question = storage
        .create_question(student.id, assignment.id, "help".to_string())
        .await
        .unwrap();
    storage
        .create_answer(professor.id, question.id, "here".to_string())
        .await
        .unwrap();

    assert!(storage.delete_assignment(assignment.id).await.unwrap());

    // 作业及其子行消失
    assert!(
        storage
            .get_assignment_by_id(assignment.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .get_question_by_id(question.id)
            .await
            .unwrap()
            .is_none()
    );

    // 课程、选课、同课程的其他作业不受影响
    assert!(storage.get_course_by_code("ML200").await.unwrap().is_some());
    assert!(storage.is_student_enrolled(student.id, "ML200").await.unwrap());
    assert!(
        storage
            .get_assignment_by_id(survivor.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn removing_student_clears_only_their_rows() {
    let storage = setup_storage().await;

    let professor = create_user(&storage, "prof_choi", UserRole::Professor).await;
    let leaver = create_user(&storage, "leaving_kid", UserRole::Student).await;
    let stayer = create_user(&storage, "staying_kid", UserRole::Student).await;

    create_course(&storage, "DB300", professor.id).await;
    storage.enroll_student(leaver.id, "DB300").await.unwrap();
    storage.enroll_student(stayer.id, "DB300").await.unwrap();

    let assignment = create_assignment(&storage, "DB300").await;

    let leaver_sub = storage
        .create_submission(
            leaver.id,
            CreateSubmissionRequest {
                assignment_id: assignment.id,
                content: "bye".to_string(),
                file_token: None,
            },
        )
        .await
        .unwrap();
    let stayer_sub = storage
        .create_submission(
            stayer.id,
            CreateSubmissionRequest {
                assignment_id: assignment.id,
                content: "hi".to_string(),
                file_token: None,
            },
        )
        .await
        .unwrap();

    let leaver_question = storage
        .create_question(leaver.id, assignment.id, "question?".to_string())
        .await
        .unwrap();
    storage
        .create_answer(professor.id, leaver_question.id, "answer".to_string())
        .await
        .unwrap();

    storage
        .remove_student_from_course(leaver.id, "DB300")
        .await
        .unwrap();

    // 被移出学生的提交、问题、选课记录全部清掉
    assert!(!storage.is_student_enrolled(leaver.id, "DB300").await.unwrap());
    assert!(
        storage
            .get_submission_by_id(leaver_sub.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        storage
            .get_question_by_id(leaver_question.id)
            .await
            .unwrap()
            .is_none()
    );

    // 其他学生的数据原样保留
    assert!(storage.is_student_enrolled(stayer.id, "DB300").await.unwrap());
    assert!(
        storage
            .get_submission_by_id(stayer_sub.id)
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        storage
            .get_assignment_by_id(assignment.id)
            .await
            .unwrap()
            .is_some()
    );
}
