//! AI 评估实体
//!
//! submission_id 唯一，一次写入后不再变更。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ai_assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub submission_id: i64,
    pub score: f64,
    #[sea_orm(column_type = "Text")]
    pub feedback: String,
    pub confidence: String,
    // 评分预言机的请求追踪 ID
    pub request_id: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_ai_assessment(self) -> crate::models::assessments::entities::AiAssessment {
        use crate::models::assessments::entities::{AiAssessment, ConfidenceBucket};
        use chrono::{DateTime, Utc};

        AiAssessment {
            id: self.id,
            submission_id: self.submission_id,
            score: self.score,
            feedback: self.feedback,
            confidence: self
                .confidence
                .parse::<ConfidenceBucket>()
                .unwrap_or(ConfidenceBucket::Low),
            request_id: self.request_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
