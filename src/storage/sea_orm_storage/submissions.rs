//! 提交存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{CourseHubError, Result};
use crate::models::submissions::{
    entities::Submission,
    requests::CreateSubmissionRequest,
    responses::{SubmissionListItem, SubmissionListResponse, SubmissionStudent},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建提交
    ///
    /// 重复提交依赖 (assignment_id, student_id) 唯一索引拦截，
    /// 不做"先查再插"，并发下也不会出现双份提交。
    pub async fn create_submission_impl(
        &self,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(req.assignment_id),
            student_id: Set(student_id),
            content: Set(req.content),
            file_token: Set(req.file_token),
            submitted_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| match CourseHubError::from(e) {
                err if err.is_already_exists() => err,
                err => CourseHubError::database_operation(format!("创建提交失败: {err}")),
            })?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取某学生对某作业的提交
    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(
                Condition::all()
                    .add(Column::AssignmentId.eq(assignment_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出作业的全部提交（含提交人信息）
    pub async fn list_assignment_submissions_impl(
        &self,
        assignment_id: i64,
    ) -> Result<SubmissionListResponse> {
        let submissions = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        // 批量查询提交人信息
        let student_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.student_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let users = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询学生信息失败: {e}")))?;

        let user_map: HashMap<i64, _> = users.into_iter().map(|u| (u.id, u)).collect();

        let items = submissions
            .into_iter()
            .map(|s| {
                let student = user_map.get(&s.student_id);
                SubmissionListItem {
                    student: SubmissionStudent {
                        id: s.student_id,
                        username: student
                            .map(|u| u.username.clone())
                            .unwrap_or_else(|| "未知用户".to_string()),
                        display_name: student.and_then(|u| u.display_name.clone()),
                    },
                    submission: s.into_submission(),
                }
            })
            .collect();

        Ok(SubmissionListResponse { items })
    }

    /// 列出学生的全部提交
    pub async fn list_student_submissions_impl(&self, student_id: i64) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交历史失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 列出学生在某课程内的提交（按作业关联）
    pub async fn list_student_submissions_in_course_impl(
        &self,
        student_id: i64,
        course_code: &str,
    ) -> Result<Vec<Submission>> {
        let assignment_ids: Vec<i64> = Assignments::find()
            .filter(AssignmentColumn::CourseCode.eq(course_code))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询作业失败: {e}")))?
            .into_iter()
            .map(|a| a.id)
            .collect();

        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = Submissions::find()
            .filter(
                Condition::all()
                    .add(Column::AssignmentId.is_in(assignment_ids))
                    .add(Column::StudentId.eq(student_id)),
            )
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 修改提交内容（不触碰评分字段）
    pub async fn update_submission_content_impl(
        &self,
        submission_id: i64,
        content: String,
        file_token: Option<String>,
    ) -> Result<Option<Submission>> {
        let existing = self.get_submission_by_id_impl(submission_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(submission_id),
            content: Set(content),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if file_token.is_some() {
            model.file_token = Set(file_token);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("修改提交失败: {e}")))?;

        self.get_submission_by_id_impl(submission_id).await
    }

    /// 评分（重复评分覆盖 score/feedback，不改动提交内容）
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        score: i32,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        let existing = self.get_submission_by_id_impl(submission_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(submission_id),
            score: Set(Some(score)),
            feedback: Set(feedback),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("评分失败: {e}")))?;

        self.get_submission_by_id_impl(submission_id).await
    }

    /// 删除提交
    pub async fn delete_submission_impl(&self, submission_id: i64) -> Result<bool> {
        let result = Submissions::delete_by_id(submission_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
