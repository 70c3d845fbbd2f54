use crate::models::profiles::entities::{ApprovalStatus, Profile, ProfileRole};

/// 发起请求的主体
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: i64,
    pub role: ProfileRole,
    pub approval_status: ApprovalStatus,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == ProfileRole::Admin
    }

    pub fn is_approved(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
    }
}

impl From<&Profile> for Actor {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            role: profile.role.clone(),
            approval_status: profile.approval_status.clone(),
        }
    }
}
