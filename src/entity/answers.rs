//! 答案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub question_id: i64,
    pub professor_id: i64,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub answered_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ProfessorId",
        to = "super::users::Column::Id"
    )]
    Professor,
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_answer(self) -> crate::models::questions::entities::Answer {
        use crate::models::questions::entities::Answer;
        use chrono::{DateTime, Utc};

        Answer {
            id: self.id,
            question_id: self.question_id,
            professor_id: self.professor_id,
            content: self.content,
            answered_at: DateTime::<Utc>::from_timestamp(self.answered_at, 0).unwrap_or_default(),
        }
    }
}
