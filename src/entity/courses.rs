//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    // 课程代码即主键，创建后不可变更
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_code: String,
    pub course_name: String,
    pub professor_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ProfessorId",
        to = "super::users::Column::Id"
    )]
    Professor,
    #[sea_orm(has_many = "super::course_sub_professors::Entity")]
    SubProfessors,
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::course_sub_professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubProfessors.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型（副教授列表由存储层补齐）
impl Model {
    pub fn into_course(
        self,
        sub_professors: Vec<i64>,
    ) -> crate::models::courses::entities::Course {
        use crate::models::courses::entities::Course;
        use chrono::{DateTime, Utc};

        Course {
            course_code: self.course_code,
            course_name: self.course_name,
            professor_id: self.professor_id,
            sub_professors,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
