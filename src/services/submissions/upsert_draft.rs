use tracing::info;

use super::{SubmissionService, submission_resource};
use crate::errors::{Result, VocademyError};
use crate::models::submissions::{
    entities::{Submission, SubmissionStatus},
    requests::UpsertDraftRequest,
};
use crate::policy::{Action, Actor, evaluate};
use crate::storage::ensure_found;

pub(super) async fn upsert_draft(
    service: &SubmissionService,
    actor: &Actor,
    assignment_id: i64,
    req: UpsertDraftRequest,
) -> Result<Submission> {
    let assignment = ensure_found(
        service.storage.get_assignment_by_id(assignment_id).await?,
        "assignment",
    )?;

    // 还没有提交记录时按新草稿决策
    let current_status = service
        .storage
        .get_submission(assignment_id, actor.id)
        .await?
        .map(|s| s.status)
        .unwrap_or(SubmissionStatus::Draft);

    let resource = submission_resource(
        service,
        actor,
        &assignment,
        actor.id,
        current_status,
        false,
    )
    .await?;
    evaluate(actor, Action::Update, &resource).require("save draft answers")?;

    let unknown: Vec<i64> = req
        .answers
        .keys()
        .filter(|qid| !assignment.question_ids.contains(qid))
        .copied()
        .collect();
    if !unknown.is_empty() {
        return Err(VocademyError::validation(format!(
            "作答引用了作业之外的题目: {unknown:?}"
        )));
    }

    let submission = service
        .storage
        .merge_draft_answers(assignment_id, actor.id, req.answers)
        .await?;

    info!(
        actor_id = actor.id,
        assignment_id,
        submission_id = submission.id,
        answered = submission.answers.len(),
        "草稿已保存"
    );
    Ok(submission)
}
