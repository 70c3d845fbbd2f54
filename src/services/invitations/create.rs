use tracing::info;

use super::InvitationService;
use crate::errors::{Result, VocademyError};
use crate::models::invitations::{entities::Invitation, requests::CreateInvitationRequest};
use crate::policy::{Action, Actor, Resource, evaluate};
use crate::utils::random_code::generate_invitation_token;
use crate::utils::validate::validate_email;

pub(super) async fn create_invitation(
    service: &InvitationService,
    actor: &Actor,
    req: CreateInvitationRequest,
) -> Result<Invitation> {
    evaluate(
        actor,
        Action::Create,
        &Resource::Invitation {
            invited_by: actor.id,
            used: false,
            invite_role: Some(req.role.clone()),
        },
    )
    .require("create invitation")?;

    validate_email(&req.email).map_err(VocademyError::validation)?;
    if service
        .storage
        .get_profile_by_email(&req.email)
        .await?
        .is_some()
    {
        return Err(VocademyError::invalid_state("该邮箱已有档案，无需邀请"));
    }

    let token = generate_invitation_token();
    let invitation = service.storage.create_invitation(actor.id, &token, req).await?;

    info!(
        actor_id = actor.id,
        invitation_id = invitation.id,
        role = %invitation.role,
        "邀请已签发"
    );
    Ok(invitation)
}
