use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 全局角色
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub enum ProfileRole {
    Student,      // 学生
    CourseLeader, // 课程负责人
    Admin,        // 管理员
}

impl ProfileRole {
    pub const STUDENT: &'static str = "student";
    pub const COURSE_LEADER: &'static str = "course_leader";
    pub const ADMIN: &'static str = "admin";

    pub fn admin_roles() -> &'static [&'static ProfileRole] {
        &[&Self::Admin]
    }
    pub fn course_leader_roles() -> &'static [&'static ProfileRole] {
        &[&Self::CourseLeader, &Self::Admin]
    }
    pub fn all_roles() -> &'static [&'static ProfileRole] {
        &[&Self::Student, &Self::CourseLeader, &Self::Admin]
    }
}

impl<'de> Deserialize<'de> for ProfileRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            ProfileRole::STUDENT => Ok(ProfileRole::Student),
            ProfileRole::COURSE_LEADER => Ok(ProfileRole::CourseLeader),
            ProfileRole::ADMIN => Ok(ProfileRole::Admin),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: student, course_leader, admin"
            ))),
        }
    }
}

impl std::fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileRole::Student => write!(f, "{}", ProfileRole::STUDENT),
            ProfileRole::CourseLeader => write!(f, "{}", ProfileRole::COURSE_LEADER),
            ProfileRole::Admin => write!(f, "{}", ProfileRole::ADMIN),
        }
    }
}

impl std::str::FromStr for ProfileRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(ProfileRole::Student),
            "course_leader" => Ok(ProfileRole::CourseLeader),
            "admin" => Ok(ProfileRole::Admin),
            _ => Err(format!("Invalid profile role: {s}")),
        }
    }
}

// 审批状态
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub enum ApprovalStatus {
    Pending,  // 待审批
    Approved, // 已通过
    Rejected, // 已拒绝
}

impl<'de> Deserialize<'de> for ApprovalStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            _ => Err(serde::de::Error::custom(format!(
                "无效的审批状态: '{s}'. 支持的状态: pending, approved, rejected"
            ))),
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::Approved => write!(f, "approved"),
            ApprovalStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            _ => Err(format!("Invalid approval status: {s}")),
        }
    }
}

/// 用户档案
///
/// 只能经由邀请兑换创建；角色与审批状态仅管理员可变更。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub display_name: Option<String>,
    pub role: ProfileRole,
    pub approval_status: ApprovalStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Profile {
    pub fn is_approved(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
    }
}
