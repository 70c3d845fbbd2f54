use std::sync::Arc;

use tracing::info;

use super::{AssessmentService, load_submission_context};
use crate::errors::{Result, VocademyError};
use crate::models::assessments::{entities::AiAssessment, requests::RecordAiAssessmentRequest};
use crate::models::assignments::entities::Assignment;
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::oracle::{ScoringItem, ScoringOracle};
use crate::policy::{Action, Actor, evaluate};
use crate::storage::Storage;

/// 手动触发 AI 评分
///
/// 自动评分失败后的重触发入口；已有评估的提交不能重评。
pub(super) async fn trigger_assessment(
    service: &AssessmentService,
    actor: &Actor,
    submission_id: i64,
) -> Result<AiAssessment> {
    let (submission, assignment, resource) =
        load_submission_context(service, actor, submission_id, true).await?;
    evaluate(actor, Action::Update, &resource).require("trigger assessment")?;

    if submission.status == SubmissionStatus::Draft {
        return Err(VocademyError::invalid_state("草稿提交不能评估"));
    }
    if service
        .storage
        .get_ai_assessment(submission_id)
        .await?
        .is_some()
    {
        return Err(VocademyError::already_assessed(
            "该提交已有 AI 评估，结果一次性写入不可覆盖",
        ));
    }

    let assessment =
        score_submission(&service.storage, &service.oracle, &submission, &assignment).await?;
    info!(
        actor_id = actor.id,
        submission_id,
        score = assessment.score,
        "AI 评估已手动触发"
    );
    Ok(assessment)
}

/// 调用评分预言机并一次性写入评估结果
///
/// 评分素材按作业内题目顺序组织，只带已作答的题。
pub(crate) async fn score_submission(
    storage: &Arc<dyn Storage>,
    oracle: &Arc<dyn ScoringOracle>,
    submission: &Submission,
    assignment: &Assignment,
) -> Result<AiAssessment> {
    let mut items = Vec::new();
    for question_id in &assignment.question_ids {
        if let Some(answer) = submission.answers.get(question_id)
            && let Some(question) = storage.get_question_by_id(*question_id).await?
        {
            items.push(ScoringItem {
                question_id: *question_id,
                question: question.content,
                answer: answer.clone(),
                rubric: question.rubric,
            });
        }
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    let verdict = oracle.assess(&request_id, &items).await?;

    storage
        .insert_ai_assessment(
            submission.id,
            RecordAiAssessmentRequest {
                score: verdict.score,
                feedback: verdict.feedback,
                confidence: verdict.confidence,
            },
            Some(request_id),
        )
        .await
}
