use tracing::{info, warn};

use super::{SubmissionService, submission_resource};
use crate::errors::{Result, VocademyError};
use crate::models::submissions::entities::Submission;
use crate::policy::{Action, Actor, evaluate};
use crate::services::assessments::score_submission;
use crate::storage::{ensure_affected, ensure_found};

pub(super) async fn submit(
    service: &SubmissionService,
    actor: &Actor,
    assignment_id: i64,
) -> Result<Submission> {
    let assignment = ensure_found(
        service.storage.get_assignment_by_id(assignment_id).await?,
        "assignment",
    )?;
    let submission = ensure_found(
        service.storage.get_submission(assignment_id, actor.id).await?,
        "submission",
    )?;

    let resource = submission_resource(
        service,
        actor,
        &assignment,
        actor.id,
        submission.status.clone(),
        false,
    )
    .await?;
    evaluate(actor, Action::Update, &resource).require("submit answers")?;

    if !service.allow_partial {
        let missing = submission.missing_answers(&assignment.question_ids);
        if !missing.is_empty() {
            return Err(VocademyError::incomplete_submission(format!(
                "作业还有未作答的题目: {missing:?}"
            )));
        }
    }

    // 条件更新只命中 draft 行，并发重复提交只有一个成功
    let affected = service
        .storage
        .mark_submitted(assignment_id, actor.id)
        .await?;
    ensure_affected(affected, "submit answers")?;

    let submitted = ensure_found(
        service.storage.get_submission(assignment_id, actor.id).await?,
        "submission",
    )?;
    info!(
        actor_id = actor.id,
        assignment_id,
        submission_id = submitted.id,
        "作业已提交"
    );

    // 评分失败不回滚提交，保持 submitted 等待重触发或人工评分
    if service.auto_assess
        && let Err(e) =
            score_submission(&service.storage, &service.oracle, &submitted, &assignment).await
    {
        warn!(
            submission_id = submitted.id,
            error = %e,
            "自动评分失败，提交保持待评状态"
        );
    }

    Ok(submitted)
}
