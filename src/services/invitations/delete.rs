use tracing::info;

use super::InvitationService;
use crate::errors::Result;
use crate::policy::{Action, Actor, Resource, evaluate};
use crate::storage::{ensure_affected, ensure_found};

pub(super) async fn delete_invitation(
    service: &InvitationService,
    actor: &Actor,
    id: i64,
) -> Result<()> {
    let invitation = ensure_found(
        service.storage.get_invitation_by_id(id).await?,
        "invitation",
    )?;

    evaluate(
        actor,
        Action::Delete,
        &Resource::Invitation {
            invited_by: invitation.invited_by,
            used: invitation.is_used(),
            invite_role: None,
        },
    )
    .require("delete invitation")?;

    // 存储层只删未使用的行，并发兑换时零行变更会显式失败
    let affected = service.storage.delete_invitation(id).await?;
    ensure_affected(affected, "delete invitation")?;

    info!(actor_id = actor.id, invitation_id = id, "邀请已删除");
    Ok(())
}
