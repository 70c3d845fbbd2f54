use super::{SubmissionService, submission_resource};
use crate::errors::Result;
use crate::models::submissions::responses::SubmissionDetailResponse;
use crate::policy::{Action, Actor, evaluate};
use crate::storage::ensure_found;

pub(super) async fn get_detail(
    service: &SubmissionService,
    actor: &Actor,
    submission_id: i64,
) -> Result<SubmissionDetailResponse> {
    let submission = ensure_found(
        service.storage.get_submission_by_id(submission_id).await?,
        "submission",
    )?;
    let assignment = ensure_found(
        service
            .storage
            .get_assignment_by_id(submission.assignment_id)
            .await?,
        "assignment",
    )?;

    let resource = submission_resource(
        service,
        actor,
        &assignment,
        submission.student_id,
        submission.status.clone(),
        false,
    )
    .await?;
    evaluate(actor, Action::Read, &resource).require("read submission")?;

    // AI 评估一旦存在即对可见者展示；最终评分存在时以其为准
    let ai_assessment = service.storage.get_ai_assessment(submission_id).await?;
    let final_grade = service.storage.get_final_grade(submission_id).await?;

    Ok(SubmissionDetailResponse {
        submission,
        ai_assessment,
        final_grade,
    })
}
