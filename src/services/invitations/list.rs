use super::InvitationService;
use crate::errors::{Result, VocademyError};
use crate::models::invitations::{
    requests::InvitationListQuery, responses::InvitationListResponse,
};
use crate::models::profiles::entities::ProfileRole;
use crate::policy::Actor;

/// 管理员看到全部邀请，课程负责人只看到自己签发的
pub(super) async fn list_invitations(
    service: &InvitationService,
    actor: &Actor,
    query: InvitationListQuery,
) -> Result<InvitationListResponse> {
    crate::services::require_approved(actor)?;
    let scope = if actor.is_admin() {
        None
    } else if actor.role == ProfileRole::CourseLeader {
        Some(actor.id)
    } else {
        return Err(VocademyError::role_forbidden("没有查看邀请的权限"));
    };

    service
        .storage
        .list_invitations_with_pagination(scope, query)
        .await
}
