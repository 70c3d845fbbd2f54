use tracing::debug;

use super::ProfileService;
use crate::errors::Result;
use crate::models::profiles::entities::Profile;
use crate::policy::{Action, Actor, Resource, evaluate};
use crate::storage::ensure_found;

pub(super) async fn get_profile(
    service: &ProfileService,
    actor: &Actor,
    id: i64,
) -> Result<Profile> {
    evaluate(actor, Action::Read, &Resource::Profile { owner_id: id }).require("read profile")?;

    debug!(actor_id = actor.id, profile_id = id, "读取档案");
    ensure_found(service.storage.get_profile_by_id(id).await?, "profile")
}
