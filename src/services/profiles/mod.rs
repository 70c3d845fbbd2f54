//! 档案服务
//!
//! 角色与审批状态是授权模型的输入，只有管理员可以变更；
//! 档案本体（显示名等）归属主体自己。

mod approve;
mod change_role;
mod get;
mod list;
mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::profiles::{
    entities::Profile,
    requests::{ApproveProfileRequest, ChangeRoleRequest, ProfileListQuery, UpdateProfileRequest},
    responses::ProfileListResponse,
};
use crate::policy::Actor;
use crate::storage::Storage;

pub struct ProfileService {
    storage: Arc<dyn Storage>,
}

impl ProfileService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn get_profile(&self, actor: &Actor, id: i64) -> Result<Profile> {
        get::get_profile(self, actor, id).await
    }

    pub async fn update_profile(
        &self,
        actor: &Actor,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Profile> {
        update::update_profile(self, actor, id, update).await
    }

    pub async fn approve_profile(
        &self,
        actor: &Actor,
        id: i64,
        req: ApproveProfileRequest,
    ) -> Result<Profile> {
        approve::approve_profile(self, actor, id, req).await
    }

    pub async fn change_role(
        &self,
        actor: &Actor,
        id: i64,
        req: ChangeRoleRequest,
    ) -> Result<Profile> {
        change_role::change_role(self, actor, id, req).await
    }

    pub async fn list_profiles(
        &self,
        actor: &Actor,
        query: ProfileListQuery,
    ) -> Result<ProfileListResponse> {
        list::list_profiles(self, actor, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VocademyError;
    use crate::models::profiles::entities::{ApprovalStatus, ProfileRole};
    use crate::services::testing::{actor_of, memory_storage, seed_approved, seed_profile};

    #[tokio::test]
    async fn test_pending_profile_reads_only_itself() {
        let storage = memory_storage().await;
        let service = ProfileService::new(storage.clone());

        let pending = seed_profile(
            &storage,
            "pending@example.com",
            ProfileRole::Student,
            ApprovalStatus::Pending,
        )
        .await;
        let other = seed_approved(&storage, "other@example.com", ProfileRole::Student).await;

        let actor = actor_of(&pending);
        let own = service.get_profile(&actor, pending.id).await.unwrap();
        assert_eq!(own.email, "pending@example.com");

        let err = service.get_profile(&actor, other.id).await.unwrap_err();
        assert!(matches!(err, VocademyError::NotApproved(_)));
    }

    #[tokio::test]
    async fn test_approval_is_admin_only() {
        let storage = memory_storage().await;
        let service = ProfileService::new(storage.clone());

        let leader = seed_approved(&storage, "leader@example.com", ProfileRole::CourseLeader).await;
        let admin = seed_approved(&storage, "admin@example.com", ProfileRole::Admin).await;
        let pending = seed_profile(
            &storage,
            "newcomer@example.com",
            ProfileRole::Student,
            ApprovalStatus::Pending,
        )
        .await;

        let req = ApproveProfileRequest {
            approval_status: ApprovalStatus::Approved,
        };

        let err = service
            .approve_profile(&actor_of(&leader), pending.id, req.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::RoleForbidden(_)));

        let approved = service
            .approve_profile(&actor_of(&admin), pending.id, req)
            .await
            .unwrap();
        assert_eq!(approved.approval_status, ApprovalStatus::Approved);
    }

    #[tokio::test]
    async fn test_change_role_missing_profile_is_visible_failure() {
        let storage = memory_storage().await;
        let service = ProfileService::new(storage.clone());
        let admin = seed_approved(&storage, "admin@example.com", ProfileRole::Admin).await;

        let err = service
            .change_role(
                &actor_of(&admin),
                9999,
                ChangeRoleRequest {
                    role: ProfileRole::CourseLeader,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NoRowsAffected(_)));
    }

    #[tokio::test]
    async fn test_pending_admin_has_no_admin_powers() {
        let storage = memory_storage().await;
        let service = ProfileService::new(storage.clone());

        let pending_admin = seed_profile(
            &storage,
            "newadmin@example.com",
            ProfileRole::Admin,
            ApprovalStatus::Pending,
        )
        .await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;
        let actor = actor_of(&pending_admin);

        // 审批门禁先于管理员短路，目标档案保持原角色
        let err = service
            .change_role(
                &actor,
                student.id,
                ChangeRoleRequest {
                    role: ProfileRole::Admin,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotApproved(_)));
        let untouched = storage
            .get_profile_by_id(student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.role, ProfileRole::Student);

        // 也不能给自己的审批放行
        let err = service
            .approve_profile(
                &actor,
                pending_admin.id,
                ApproveProfileRequest {
                    approval_status: ApprovalStatus::Approved,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotApproved(_)));

        let err = service
            .list_profiles(&actor, ProfileListQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::NotApproved(_)));
    }

    #[tokio::test]
    async fn test_list_profiles_admin_only() {
        let storage = memory_storage().await;
        let service = ProfileService::new(storage.clone());

        let admin = seed_approved(&storage, "admin@example.com", ProfileRole::Admin).await;
        let student = seed_approved(&storage, "student@example.com", ProfileRole::Student).await;

        let listed = service
            .list_profiles(&actor_of(&admin), ProfileListQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.items.len(), 2);

        let err = service
            .list_profiles(&actor_of(&student), ProfileListQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VocademyError::RoleForbidden(_)));
    }
}
