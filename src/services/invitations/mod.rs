//! 邀请服务
//!
//! 注册走邀请制：签发者生成一次性 token，被邀请人兑换后创建档案。
//! 已使用的邀请是终态，任何角色都不能删除或重发。

mod create;
mod delete;
mod list;
mod redeem;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::invitations::{
    entities::Invitation,
    requests::{CreateInvitationRequest, InvitationListQuery, RedeemInvitationRequest},
    responses::{InvitationListResponse, RedeemInvitationResponse},
};
use crate::policy::Actor;
use crate::storage::Storage;

pub struct InvitationService {
    storage: Arc<dyn Storage>,
}

impl InvitationService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn create_invitation(
        &self,
        actor: &Actor,
        req: CreateInvitationRequest,
    ) -> Result<Invitation> {
        create::create_invitation(self, actor, req).await
    }

    pub async fn list_invitations(
        &self,
        actor: &Actor,
        query: InvitationListQuery,
    ) -> Result<InvitationListResponse> {
        list::list_invitations(self, actor, query).await
    }

    pub async fn delete_invitation(&self, actor: &Actor, id: i64) -> Result<()> {
        delete::delete_invitation(self, actor, id).await
    }

    /// 兑换不要求已认证主体，token 即凭证
    pub async fn redeem_invitation(
        &self,
        req: RedeemInvitationRequest,
    ) -> Result<RedeemInvitationResponse> {
        redeem::redeem_invitation(self, req).await
    }
}
