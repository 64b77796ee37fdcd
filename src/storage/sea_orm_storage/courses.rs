//! 课程存储操作
//!
//! 课程删除是应用层编排的级联清理（提交 -> 答案 -> 问题 -> 作业 -> 选课 -> 课程），
//! 在单个事务中执行，任一步失败则整体回滚。

use super::SeaOrmStorage;
use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::course_sub_professors::{
    ActiveModel as SubProfessorActiveModel, Column as SubProfessorColumn,
    Entity as CourseSubProfessors,
};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{CourseHubError, Result};
use crate::models::courses::{entities::Course, requests::CreateCourseRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课程（课程代码应已由服务层校验并转为大写）
    pub async fn create_course_impl(
        &self,
        req: CreateCourseRequest,
        professor_id: i64,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_code: Set(req.course_code),
            course_name: Set(req.course_name),
            professor_id: Set(professor_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| match CourseHubError::from(e) {
                err if err.is_already_exists() => err,
                err => CourseHubError::database_operation(format!("创建课程失败: {err}")),
            })?;

        Ok(result.into_course(Vec::new()))
    }

    /// 查询课程的副教授 ID 列表
    async fn load_sub_professors(&self, course_code: &str) -> Result<Vec<i64>> {
        let rows = CourseSubProfessors::find()
            .filter(SubProfessorColumn::CourseCode.eq(course_code))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询副教授失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.professor_id).collect())
    }

    /// 通过课程代码获取课程（含副教授列表）
    pub async fn get_course_by_code_impl(&self, course_code: &str) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_code)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程失败: {e}")))?;

        match result {
            Some(model) => {
                let sub_professors = self.load_sub_professors(course_code).await?;
                Ok(Some(model.into_course(sub_professors)))
            }
            None => Ok(None),
        }
    }

    /// 为课程集合补齐副教授列表
    async fn into_courses_with_subs(
        &self,
        models: Vec<crate::entity::courses::Model>,
    ) -> Result<Vec<Course>> {
        let mut courses = Vec::with_capacity(models.len());
        for model in models {
            let sub_professors = self.load_sub_professors(&model.course_code).await?;
            courses.push(model.into_course(sub_professors));
        }
        Ok(courses)
    }

    /// 列出教授的课程（主讲或副教授）
    pub async fn list_professor_courses_impl(&self, professor_id: i64) -> Result<Vec<Course>> {
        // 先取副教授关联的课程代码
        let sub_codes: Vec<String> = CourseSubProfessors::find()
            .filter(SubProfessorColumn::ProfessorId.eq(professor_id))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询副教授课程失败: {e}")))?
            .into_iter()
            .map(|m| m.course_code)
            .collect();

        let mut condition = Condition::any().add(Column::ProfessorId.eq(professor_id));
        if !sub_codes.is_empty() {
            condition = condition.add(Column::CourseCode.is_in(sub_codes));
        }

        let models = Courses::find()
            .filter(condition)
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程列表失败: {e}")))?;

        self.into_courses_with_subs(models).await
    }

    /// 列出学生选修的课程
    pub async fn list_student_courses_impl(&self, student_id: i64) -> Result<Vec<Course>> {
        let codes: Vec<String> = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询选课记录失败: {e}")))?
            .into_iter()
            .map(|m| m.course_code)
            .collect();

        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let models = Courses::find()
            .filter(Column::CourseCode.is_in(codes))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程列表失败: {e}")))?;

        self.into_courses_with_subs(models).await
    }

    /// 添加副教授
    pub async fn add_sub_professor_impl(&self, course_code: &str, professor_id: i64) -> Result<()> {
        let model = SubProfessorActiveModel {
            course_code: Set(course_code.to_string()),
            professor_id: Set(professor_id),
            joined_at: Set(chrono::Utc::now().timestamp()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| match CourseHubError::from(e) {
                err if err.is_already_exists() => err,
                err => CourseHubError::database_operation(format!("添加副教授失败: {err}")),
            })?;

        Ok(())
    }

    /// 移除副教授
    pub async fn remove_sub_professor_impl(
        &self,
        course_code: &str,
        professor_id: i64,
    ) -> Result<bool> {
        let result = CourseSubProfessors::delete_many()
            .filter(
                Condition::all()
                    .add(SubProfessorColumn::CourseCode.eq(course_code))
                    .add(SubProfessorColumn::ProfessorId.eq(professor_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("移除副教授失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除课程（级联清理，单事务）
    ///
    /// 顺序：各作业的提交 -> 各问题的答案 -> 问题 -> 作业 -> 选课 -> 副教授关联 -> 课程。
    /// 始终先删子行再删父行，避免留下不可达的孤儿数据。
    pub async fn delete_course_impl(&self, course_code: &str) -> Result<bool> {
        let code = course_code.to_string();

        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    // 1. 课程的全部作业
                    let assignments = Assignments::find()
                        .filter(AssignmentColumn::CourseCode.eq(code.as_str()))
                        .all(txn)
                        .await?;
                    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();

                    if !assignment_ids.is_empty() {
                        // 2. 各作业的提交
                        Submissions::delete_many()
                            .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids.clone()))
                            .exec(txn)
                            .await?;

                        // 3. 各作业问题的答案，再删问题
                        let question_ids: Vec<i64> = Questions::find()
                            .filter(QuestionColumn::AssignmentId.is_in(assignment_ids.clone()))
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

                        // 4. 作业本身
                        Assignments::delete_many()
                            .filter(AssignmentColumn::Id.is_in(assignment_ids))
                            .exec(txn)
                            .await?;
                    }

                    // 5. 选课记录
                    Enrollments::delete_many()
                        .filter(EnrollmentColumn::CourseCode.eq(code.as_str()))
                        .exec(txn)
                        .await?;

                    // 6. 副教授关联
                    CourseSubProfessors::delete_many()
                        .filter(SubProfessorColumn::CourseCode.eq(code.as_str()))
                        .exec(txn)
                        .await?;

                    // 7. 课程本身
                    let result = Courses::delete_by_id(code.as_str()).exec(txn).await?;

                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(deleted)
    }
}
