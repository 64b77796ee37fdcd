//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::entity::course_sub_professors::{
    Column as SubProfessorColumn, Entity as CourseSubProfessors,
};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{CourseHubError, Result};
use crate::models::assignments::{
    entities::Assignment,
    requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_code: Set(req.course_code),
            title: Set(req.title),
            content: Set(req.content),
            due_at: Set(req.due_at.map(|dt| dt.timestamp())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出课程作业
    pub async fn list_course_assignments_impl(&self, course_code: &str) -> Result<Vec<Assignment>> {
        let results = Assignments::find()
            .filter(Column::CourseCode.eq(course_code))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 按课程代码集合列出作业
    async fn list_assignments_by_codes(&self, codes: Vec<String>) -> Result<Vec<Assignment>> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let results = Assignments::find()
            .filter(Column::CourseCode.is_in(codes))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 列出教授名下（主讲或副教授）所有课程的作业
    pub async fn list_assignments_for_professor_impl(
        &self,
        professor_id: i64,
    ) -> Result<Vec<Assignment>> {
        let mut codes: Vec<String> = Courses::find()
            .filter(CourseColumn::ProfessorId.eq(professor_id))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|c| c.course_code)
            .collect();

        let sub_codes: Vec<String> = CourseSubProfessors::find()
            .filter(SubProfessorColumn::ProfessorId.eq(professor_id))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询副教授课程失败: {e}")))?
            .into_iter()
            .map(|m| m.course_code)
            .collect();

        codes.extend(sub_codes);
        codes.sort();
        codes.dedup();

        self.list_assignments_by_codes(codes).await
    }

    /// 列出学生所有选修课程的作业
    pub async fn list_assignments_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Assignment>> {
        let codes: Vec<String> = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询选课记录失败: {e}")))?
            .into_iter()
            .map(|m| m.course_code)
            .collect();

        self.list_assignments_by_codes(codes).await
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        // 先检查作业是否存在
        let existing = self.get_assignment_by_id_impl(assignment_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(assignment_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(content) = update.content {
            model.content = Set(content);
        }

        if let Some(due_at) = update.due_at {
            model.due_at = Set(Some(due_at.timestamp()));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("更新作业失败: {e}")))?;

        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 删除作业（级联清理，单事务）
    ///
    /// 顺序：提交 -> 各问题的答案 -> 问题 -> 作业。
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(move |txn| {
                Box::pin(async move {
                    // 1. 全部提交
                    Submissions::delete_many()
                        .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
                        .exec(txn)
                        .await?;

                    // 2. 各问题的答案，再删问题
                    let question_ids: Vec<i64> = Questions::find()
                        .filter(QuestionColumn::AssignmentId.eq(assignment_id))
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

                    // 3. 作业本身
                    let result = Assignments::delete_by_id(assignment_id).exec(txn).await?;

                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(deleted)
    }
}
