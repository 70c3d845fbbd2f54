//! 邀请实体
//!
//! token 由外部发号器生成，全局唯一；used_at 非空后进入终态。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invitations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub token: String,
    pub email: String,
    pub role: String,
    pub invited_by: i64,
    pub used_at: Option<i64>,
    pub used_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::InvitedBy",
        to = "super::profiles::Column::Id"
    )]
    Inviter,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inviter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_invitation(self) -> crate::models::invitations::entities::Invitation {
        use crate::models::invitations::entities::Invitation;
        use crate::models::profiles::entities::ProfileRole;
        use chrono::{DateTime, Utc};

        Invitation {
            id: self.id,
            token: self.token,
            email: self.email,
            role: self
                .role
                .parse::<ProfileRole>()
                .unwrap_or(ProfileRole::Student),
            invited_by: self.invited_by,
            used_at: self
                .used_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            used_by: self.used_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
