use super::{SubmissionService, submission_resource};
use crate::errors::{Result, VocademyError};
use crate::models::profiles::entities::ProfileRole;
use crate::models::submissions::{
    entities::SubmissionStatus, requests::SubmissionListQuery,
    responses::SubmissionListResponse,
};
use crate::policy::{Action, Actor, evaluate};
use crate::storage::ensure_found;

/// 提交列表按角色收窄
///
/// 学生只看到自己的提交；教师需要指定作业并持有该课程的授课指派；
/// 管理员不受限。
pub(super) async fn list_submissions(
    service: &SubmissionService,
    actor: &Actor,
    query: SubmissionListQuery,
) -> Result<SubmissionListResponse> {
    crate::services::require_approved(actor)?;
    if actor.is_admin() {
        return service
            .storage
            .list_submissions_with_pagination(None, query)
            .await;
    }

    if actor.role == ProfileRole::Student {
        return service
            .storage
            .list_submissions_with_pagination(Some(actor.id), query)
            .await;
    }

    let assignment_id = query
        .assignment_id
        .ok_or_else(|| VocademyError::validation("assignment_id 参数缺失"))?;
    let assignment = ensure_found(
        service.storage.get_assignment_by_id(assignment_id).await?,
        "assignment",
    )?;

    // 借用提交的读规则校验教师身份，student_id 取不可能命中的哨兵值
    let resource = submission_resource(
        service,
        actor,
        &assignment,
        -1,
        SubmissionStatus::Submitted,
        false,
    )
    .await?;
    evaluate(actor, Action::Read, &resource).require("list submissions")?;

    service
        .storage
        .list_submissions_with_pagination(None, query)
        .await
}
