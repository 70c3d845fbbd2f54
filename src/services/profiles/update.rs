use tracing::info;

use super::ProfileService;
use crate::errors::Result;
use crate::models::profiles::{entities::Profile, requests::UpdateProfileRequest};
use crate::policy::{Action, Actor, Resource, evaluate};
use crate::storage::ensure_found;

pub(super) async fn update_profile(
    service: &ProfileService,
    actor: &Actor,
    id: i64,
    update: UpdateProfileRequest,
) -> Result<Profile> {
    evaluate(actor, Action::Update, &Resource::Profile { owner_id: id })
        .require("update profile")?;

    let profile = ensure_found(service.storage.update_profile(id, update).await?, "profile")?;
    info!(actor_id = actor.id, profile_id = id, "档案已更新");
    Ok(profile)
}
