//! 上传文件实体
//!
//! token 即主键，也是对外的下载标识；磁盘路径由 token 推出。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub user_id: i64,
    pub uploaded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_file(self) -> crate::models::files::entities::File {
        use crate::models::files::entities::File;
        use chrono::{DateTime, Utc};

        File {
            token: self.token,
            file_name: self.file_name,
            file_size: self.file_size,
            file_type: self.file_type,
            user_id: self.user_id,
            uploaded_at: DateTime::<Utc>::from_timestamp(self.uploaded_at, 0).unwrap_or_default(),
        }
    }
}
