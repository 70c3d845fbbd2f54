//! 题目实体
//!
//! course_id 为空表示全局共享题目。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: Option<i64>,
    pub creator_id: i64,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub question_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub rubric: Option<String>,
    // JSON 数组，仅 multiple_choice 有意义
    #[sea_orm(column_type = "Text", nullable)]
    pub options: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::CreatorId",
        to = "super::profiles::Column::Id"
    )]
    Creator,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_question(self) -> crate::models::questions::entities::Question {
        use crate::models::questions::entities::{Question, QuestionType};
        use chrono::{DateTime, Utc};

        let options = self
            .options
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok());

        Question {
            id: self.id,
            course_id: self.course_id,
            creator_id: self.creator_id,
            content: self.content,
            question_type: self
                .question_type
                .parse::<QuestionType>()
                .unwrap_or(QuestionType::ShortText),
            rubric: self.rubric,
            options,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
