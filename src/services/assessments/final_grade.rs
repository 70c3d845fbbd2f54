use tracing::info;

use super::{AssessmentService, load_submission_context};
use crate::errors::{Result, VocademyError};
use crate::models::assessments::{entities::FinalGrade, requests::RecordFinalGradeRequest};
use crate::models::submissions::entities::SubmissionStatus;
use crate::policy::{Action, Actor, evaluate};
use crate::storage::ensure_affected;
use crate::utils::validate::validate_score;

/// 写入最终评分并把提交推进到 graded
///
/// 最终评分可覆盖（后写为准），提交状态只前进不后退。
pub(super) async fn record_final_grade(
    service: &AssessmentService,
    actor: &Actor,
    submission_id: i64,
    req: RecordFinalGradeRequest,
) -> Result<FinalGrade> {
    let (submission, _assignment, resource) =
        load_submission_context(service, actor, submission_id, true).await?;
    evaluate(actor, Action::Update, &resource).require("record final grade")?;

    if submission.status == SubmissionStatus::Draft {
        return Err(VocademyError::invalid_state("草稿提交不能评分"));
    }
    validate_score(req.score).map_err(VocademyError::validation)?;

    let final_grade = service
        .storage
        .upsert_final_grade(submission_id, actor.id, req)
        .await?;

    let affected = service.storage.mark_graded(submission_id).await?;
    ensure_affected(affected, "mark submission graded")?;

    info!(
        actor_id = actor.id,
        submission_id,
        score = final_grade.score,
        status = %final_grade.status,
        "最终评分已写入"
    );
    Ok(final_grade)
}
