use super::ProfileService;
use crate::errors::{Result, VocademyError};
use crate::models::profiles::{requests::ProfileListQuery, responses::ProfileListResponse};
use crate::policy::Actor;

pub(super) async fn list_profiles(
    service: &ProfileService,
    actor: &Actor,
    query: ProfileListQuery,
) -> Result<ProfileListResponse> {
    crate::services::require_approved(actor)?;
    if !actor.is_admin() {
        return Err(VocademyError::role_forbidden("只有管理员可以列出档案"));
    }

    service.storage.list_profiles_with_pagination(query).await
}
