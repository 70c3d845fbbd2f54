use tracing::{info, warn};

use super::InvitationService;
use crate::errors::{Result, VocademyError};
use crate::models::invitations::{
    requests::RedeemInvitationRequest, responses::RedeemInvitationResponse,
};
use crate::models::profiles::{entities::ApprovalStatus, requests::CreateProfileRequest};
use crate::storage::ensure_found;

/// 兑换邀请并创建档案
///
/// 邀请即审核：兑换产生的档案直接是 approved。
/// 邮箱唯一约束与 token 的原子标记共同保证单次兑换。
pub(super) async fn redeem_invitation(
    service: &InvitationService,
    req: RedeemInvitationRequest,
) -> Result<RedeemInvitationResponse> {
    let invitation = ensure_found(
        service.storage.get_invitation_by_token(&req.token).await?,
        "invitation",
    )?;
    if invitation.is_used() {
        return Err(VocademyError::already_used("邀请已被兑换"));
    }
    if service
        .storage
        .get_profile_by_email(&invitation.email)
        .await?
        .is_some()
    {
        return Err(VocademyError::invalid_state("该邮箱已有档案"));
    }

    let profile = service
        .storage
        .create_profile(CreateProfileRequest {
            email: invitation.email.clone(),
            display_name: req.display_name,
            role: invitation.role.clone(),
            approval_status: ApprovalStatus::Approved,
        })
        .await?;

    // 原子标记：并发兑换只有第一个成功
    let used = service
        .storage
        .mark_invitation_used(invitation.id, profile.id)
        .await?;
    if !used {
        warn!(
            invitation_id = invitation.id,
            profile_id = profile.id,
            "邀请在兑换过程中被抢先使用"
        );
        return Err(VocademyError::already_used("邀请已被兑换"));
    }

    info!(
        invitation_id = invitation.id,
        profile_id = profile.id,
        role = %profile.role,
        "邀请已兑换"
    );
    Ok(RedeemInvitationResponse { profile })
}
