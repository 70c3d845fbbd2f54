use super::SeaOrmStorage;
use crate::entity::ai_assessments::{
    ActiveModel as AiActiveModel, Column as AiColumn, Entity as AiAssessments,
};
use crate::entity::final_grades::{
    ActiveModel as GradeActiveModel, Column as GradeColumn, Entity as FinalGrades,
};
use crate::errors::{Result, VocademyError};
use crate::models::assessments::{
    entities::{AiAssessment, FinalGrade},
    requests::{RecordAiAssessmentRequest, RecordFinalGradeRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, sea_query::OnConflict,
};

impl SeaOrmStorage {
    /// 获取提交的 AI 评估
    pub async fn get_ai_assessment_impl(&self, submission_id: i64) -> Result<Option<AiAssessment>> {
        let result = AiAssessments::find()
            .filter(AiColumn::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询 AI 评估失败: {e}")))?;

        Ok(result.map(|m| m.into_ai_assessment()))
    }

    /// 写入 AI 评估
    ///
    /// submission_id 唯一约束使重复写入在数据库层失败，
    /// 并发下第二次写入由此转换为已评估冲突。
    pub async fn insert_ai_assessment_impl(
        &self,
        submission_id: i64,
        req: RecordAiAssessmentRequest,
        request_id: Option<String>,
    ) -> Result<AiAssessment> {
        let now = chrono::Utc::now().timestamp();

        let model = AiActiveModel {
            submission_id: Set(submission_id),
            score: Set(req.score),
            feedback: Set(req.feedback),
            confidence: Set(req.confidence.to_string()),
            request_id: Set(request_id),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            let msg = e.to_string();
            if msg.to_uppercase().contains("UNIQUE") || msg.contains("Duplicate") {
                VocademyError::already_assessed(format!(
                    "submission {submission_id} already has an assessment"
                ))
            } else {
                VocademyError::database_operation(format!("写入 AI 评估失败: {msg}"))
            }
        })?;

        Ok(result.into_ai_assessment())
    }

    /// 获取提交的最终评分
    pub async fn get_final_grade_impl(&self, submission_id: i64) -> Result<Option<FinalGrade>> {
        let result = FinalGrades::find()
            .filter(GradeColumn::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询最终评分失败: {e}")))?;

        Ok(result.map(|m| m.into_final_grade()))
    }

    /// 按 submission_id upsert 最终评分，后写覆盖先写
    pub async fn upsert_final_grade_impl(
        &self,
        submission_id: i64,
        grader_id: i64,
        req: RecordFinalGradeRequest,
    ) -> Result<FinalGrade> {
        let now = chrono::Utc::now().timestamp();

        let model = GradeActiveModel {
            submission_id: Set(submission_id),
            score: Set(req.score),
            comments: Set(req.comments),
            status: Set(req.status.to_string()),
            grader_id: Set(grader_id),
            graded_at: Set(now),
            ..Default::default()
        };

        FinalGrades::insert(model)
            .on_conflict(
                OnConflict::column(GradeColumn::SubmissionId)
                    .update_columns([
                        GradeColumn::Score,
                        GradeColumn::Comments,
                        GradeColumn::Status,
                        GradeColumn::GraderId,
                        GradeColumn::GradedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("写入最终评分失败: {e}")))?;

        let saved = self.get_final_grade_impl(submission_id).await?;
        saved.ok_or_else(|| {
            VocademyError::no_rows_affected(format!(
                "final grade upsert for submission {submission_id} affected zero rows"
            ))
        })
    }
}
