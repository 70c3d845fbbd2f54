use super::SeaOrmStorage;
use crate::entity::invitations::{ActiveModel, Column, Entity as Invitations};
use crate::errors::{Result, VocademyError};
use crate::models::{
    PaginationInfo,
    invitations::{
        entities::Invitation,
        requests::{CreateInvitationRequest, InvitationListQuery},
        responses::InvitationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建邀请，token 全局唯一
    pub async fn create_invitation_impl(
        &self,
        invited_by: i64,
        token: &str,
        req: CreateInvitationRequest,
    ) -> Result<Invitation> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            token: Set(token.to_string()),
            email: Set(req.email),
            role: Set(req.role.to_string()),
            invited_by: Set(invited_by),
            used_at: Set(None),
            used_by: Set(None),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("创建邀请失败: {e}")))?;

        Ok(result.into_invitation())
    }

    /// 通过 ID 获取邀请
    pub async fn get_invitation_by_id_impl(&self, id: i64) -> Result<Option<Invitation>> {
        let result = Invitations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询邀请失败: {e}")))?;

        Ok(result.map(|m| m.into_invitation()))
    }

    /// 通过 token 获取邀请
    pub async fn get_invitation_by_token_impl(&self, token: &str) -> Result<Option<Invitation>> {
        let result = Invitations::find()
            .filter(Column::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询邀请失败: {e}")))?;

        Ok(result.map(|m| m.into_invitation()))
    }

    /// 分页列出邀请，invited_by 为 Some 时收窄到该签发者
    pub async fn list_invitations_with_pagination_impl(
        &self,
        invited_by: Option<i64>,
        query: InvitationListQuery,
    ) -> Result<InvitationListResponse> {
        let page = query.pagination.page() as u64;
        let size = query.pagination.size() as u64;

        let mut select = Invitations::find();

        if let Some(invited_by) = invited_by {
            select = select.filter(Column::InvitedBy.eq(invited_by));
        }

        if let Some(used) = query.used {
            select = if used {
                select.filter(Column::UsedAt.is_not_null())
            } else {
                select.filter(Column::UsedAt.is_null())
            };
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询邀请总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询邀请列表失败: {e}")))?;

        Ok(InvitationListResponse {
            items: items.into_iter().map(|m| m.into_invitation()).collect(),
            pagination: PaginationInfo::new(page as i64, size as i64, total as i64),
        })
    }

    /// 删除邀请
    ///
    /// used_at 条件保证已使用的邀请永远不会被删掉，即便上层校验被绕过。
    pub async fn delete_invitation_impl(&self, id: i64) -> Result<bool> {
        let result = Invitations::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UsedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("删除邀请失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 原子标记邀请已使用，单次兑换保证
    pub async fn mark_invitation_used_impl(&self, id: i64, used_by: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Invitations::update_many()
            .col_expr(Column::UsedAt, Expr::value(now))
            .col_expr(Column::UsedBy, Expr::value(used_by))
            .filter(Column::Id.eq(id))
            .filter(Column::UsedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("标记邀请使用失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
