//! 最终评分实体
//!
//! submission_id 唯一；按提交 upsert，后写覆盖先写。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "final_grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub submission_id: i64,
    pub score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
    pub status: String,
    pub grader_id: i64,
    pub graded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::GraderId",
        to = "super::profiles::Column::Id"
    )]
    Grader,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_final_grade(self) -> crate::models::assessments::entities::FinalGrade {
        use crate::models::assessments::entities::{FinalGrade, GradeStatus};
        use chrono::{DateTime, Utc};

        FinalGrade {
            id: self.id,
            submission_id: self.submission_id,
            score: self.score,
            comments: self.comments,
            status: self.status.parse::<GradeStatus>().unwrap_or(GradeStatus::Fail),
            grader_id: self.grader_id,
            graded_at: DateTime::<Utc>::from_timestamp(self.graded_at, 0).unwrap_or_default(),
        }
    }
}
