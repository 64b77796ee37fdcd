//! 选课存储操作

use super::SeaOrmStorage;
use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{CourseHubError, Result};
use crate::models::courses::entities::Enrollment;
use crate::models::users::entities::User;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 学生选课
    pub async fn enroll_student_impl(
        &self,
        student_id: i64,
        course_code: &str,
    ) -> Result<Enrollment> {
        let model = ActiveModel {
            student_id: Set(student_id),
            course_code: Set(course_code.to_string()),
            enrolled_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| match CourseHubError::from(e) {
                err if err.is_already_exists() => err,
                err => CourseHubError::database_operation(format!("选课失败: {err}")),
            })?;

        Ok(result.into_enrollment())
    }

    /// 学生是否已选该课
    pub async fn is_student_enrolled_impl(
        &self,
        student_id: i64,
        course_code: &str,
    ) -> Result<bool> {
        let result = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::CourseCode.eq(course_code)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.is_some())
    }

    /// 列出课程学生
    pub async fn list_course_students_impl(&self, course_code: &str) -> Result<Vec<User>> {
        let student_ids: Vec<i64> = Enrollments::find()
            .filter(Column::CourseCode.eq(course_code))
            .order_by_asc(Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询选课记录失败: {e}")))?
            .into_iter()
            .map(|m| m.student_id)
            .collect();

        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询学生信息失败: {e}")))?;

        Ok(users.into_iter().map(|m| m.into_user()).collect())
    }

    /// 将学生移出课程（单事务）
    ///
    /// 先删除该学生在课程所有作业下的提交与问答，最后删选课记录。
    pub async fn remove_student_from_course_impl(
        &self,
        student_id: i64,
        course_code: &str,
    ) -> Result<()> {
        let code = course_code.to_string();

        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    // 1. 课程的全部作业
                    let assignment_ids: Vec<i64> = Assignments::find()
                        .filter(AssignmentColumn::CourseCode.eq(code.as_str()))
                        .all(txn)
                        .await?
                        .into_iter()
                        .map(|a| a.id)
                        .collect();

                    if !assignment_ids.is_empty() {
                        // 2. 该学生的提交
                        Submissions::delete_many()
                            .filter(
                                Condition::all()
                                    .add(
                                        SubmissionColumn::AssignmentId
                                            .is_in(assignment_ids.clone()),
                                    )
                                    .add(SubmissionColumn::StudentId.eq(student_id)),
                            )
                            .exec(txn)
                            .await?;

                        // 3. 该学生的问题及其答案
                        let question_ids: Vec<i64> = Questions::find()
                            .filter(
                                Condition::all()
                                    .add(QuestionColumn::AssignmentId.is_in(assignment_ids))
                                    .add(QuestionColumn::StudentId.eq(student_id)),
                            )
                            .all(txn)
                            .await?
                            .into_iter()
                            .map(|q| q.id)
                            .collect();

                        if !question_ids.is_empty() {
                            Answers::delete_many()
                                .filter(AnswerColumn::QuestionId.is_in(question_ids.clone()))
                                .exec(txn)
                                .await?;
                            Questions::delete_many()
                                .filter(QuestionColumn::Id.is_in(question_ids))
                                .exec(txn)
                                .await?;
                        }
                    }

                    // 4. 选课记录
                    Enrollments::delete_many()
                        .filter(
                            Condition::all()
                                .add(Column::StudentId.eq(student_id))
                                .add(Column::CourseCode.eq(code.as_str())),
                        )
                        .exec(txn)
                        .await?;

                    Ok(())
                })
            })
            .await
            .map_err(|e| CourseHubError::database_operation(format!("移出课程失败: {e}")))?;

        Ok(())
    }
}
