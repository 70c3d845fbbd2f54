//! 提交实体
//!
//! (assignment_id, student_id) 唯一：每个学生对每份作业只有一行提交记录，
//! 草稿保存通过对该行的合并式 upsert 完成。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    // JSON 对象：question_id -> 答案文本
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    pub status: String,
    pub submitted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::StudentId",
        to = "super::profiles::Column::Id"
    )]
    Student,
    #[sea_orm(has_one = "super::ai_assessments::Entity")]
    AiAssessment,
    #[sea_orm(has_one = "super::final_grades::Entity")]
    FinalGrade,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::ai_assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiAssessment.def()
    }
}

impl Related<super::final_grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinalGrade.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::{Submission, SubmissionStatus};
        use chrono::{DateTime, Utc};
        use std::collections::BTreeMap;

        let answers =
            serde_json::from_str::<BTreeMap<i64, String>>(&self.answers).unwrap_or_default();

        Submission {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            answers,
            status: self
                .status
                .parse::<SubmissionStatus>()
                .unwrap_or(SubmissionStatus::Draft),
            submitted_at: self
                .submitted_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
