//! 答疑存储操作

use super::SeaOrmStorage;
use crate::entity::answers::{ActiveModel as AnswerActiveModel, Column as AnswerColumn, Entity as Answers};
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::course_sub_professors::{
    Column as SubProfessorColumn, Entity as CourseSubProfessors,
};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::errors::{CourseHubError, Result};
use crate::models::questions::entities::{Answer, Question};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 学生提问
    pub async fn create_question_impl(
        &self,
        student_id: i64,
        assignment_id: i64,
        content: String,
    ) -> Result<Question> {
        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            content: Set(content),
            asked_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建问题失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 加载答案（按回答时间升序）
    async fn load_answers(&self, question_id: i64) -> Result<Vec<Answer>> {
        let answers = Answers::find()
            .filter(AnswerColumn::QuestionId.eq(question_id))
            .order_by_asc(AnswerColumn::AnsweredAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询答案失败: {e}")))?;

        Ok(answers.into_iter().map(|m| m.into_answer()).collect())
    }

    /// 为问题集合补齐答案
    async fn into_questions_with_answers(
        &self,
        models: Vec<crate::entity::questions::Model>,
    ) -> Result<Vec<Question>> {
        let mut questions = Vec::with_capacity(models.len());
        for model in models {
            let mut question = model.into_question();
            question.answers = self.load_answers(question.id).await?;
            questions.push(question);
        }
        Ok(questions)
    }

    /// 通过 ID 获取问题（含答案）
    pub async fn get_question_by_id_impl(&self, question_id: i64) -> Result<Option<Question>> {
        let result = Questions::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询问题失败: {e}")))?;

        match result {
            Some(model) => {
                let mut question = model.into_question();
                question.answers = self.load_answers(question.id).await?;
                Ok(Some(question))
            }
            None => Ok(None),
        }
    }

    /// 列出作业全部问题（含答案）
    pub async fn list_assignment_questions_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Question>> {
        let models = Questions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::AskedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询问题列表失败: {e}")))?;

        self.into_questions_with_answers(models).await
    }

    /// 列出某学生在某作业下的问题（含答案）
    pub async fn list_student_assignment_questions_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Vec<Question>> {
        let models = Questions::find()
            .filter(
                Condition::all()
                    .add(Column::AssignmentId.eq(assignment_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .order_by_desc(Column::AskedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询问题列表失败: {e}")))?;

        self.into_questions_with_answers(models).await
    }

    /// 列出教授名下（主讲或副教授）所有课程的问题（含答案）
    pub async fn list_professor_questions_impl(&self, professor_id: i64) -> Result<Vec<Question>> {
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

        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let assignment_ids: Vec<i64> = Assignments::find()
            .filter(AssignmentColumn::CourseCode.is_in(codes))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询作业失败: {e}")))?
            .into_iter()
            .map(|a| a.id)
            .collect();

        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = Questions::find()
            .filter(Column::AssignmentId.is_in(assignment_ids))
            .order_by_desc(Column::AskedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询问题列表失败: {e}")))?;

        self.into_questions_with_answers(models).await
    }

    /// 教授回答问题
    pub async fn create_answer_impl(
        &self,
        professor_id: i64,
        question_id: i64,
        content: String,
    ) -> Result<Answer> {
        let model = AnswerActiveModel {
            question_id: Set(question_id),
            professor_id: Set(professor_id),
            content: Set(content),
            answered_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建答案失败: {e}")))?;

        Ok(result.into_answer())
    }
}
