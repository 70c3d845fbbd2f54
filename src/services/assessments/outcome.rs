use super::{AssessmentService, load_submission_context};
use crate::errors::Result;
use crate::models::assessments::responses::AssessmentOutcomeResponse;
use crate::policy::{Action, Actor, evaluate};

pub(super) async fn get_outcome(
    service: &AssessmentService,
    actor: &Actor,
    submission_id: i64,
) -> Result<AssessmentOutcomeResponse> {
    let (_submission, _assignment, resource) =
        load_submission_context(service, actor, submission_id, false).await?;
    evaluate(actor, Action::Read, &resource).require("read assessment outcome")?;

    let ai_assessment = service.storage.get_ai_assessment(submission_id).await?;
    let final_grade = service.storage.get_final_grade(submission_id).await?;

    Ok(AssessmentOutcomeResponse {
        submission_id,
        authoritative: final_grade.is_some(),
        ai_assessment,
        final_grade,
    })
}
