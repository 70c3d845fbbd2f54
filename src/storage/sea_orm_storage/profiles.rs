use super::SeaOrmStorage;
use crate::entity::profiles::{ActiveModel, Column, Entity as Profiles};
use crate::errors::{Result, VocademyError};
use crate::models::{
    PaginationInfo,
    profiles::{
        entities::{ApprovalStatus, Profile, ProfileRole},
        requests::{CreateProfileRequest, ProfileListQuery, UpdateProfileRequest},
        responses::ProfileListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建档案
    pub async fn create_profile_impl(&self, req: CreateProfileRequest) -> Result<Profile> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(req.email),
            display_name: Set(req.display_name),
            role: Set(req.role.to_string()),
            approval_status: Set(req.approval_status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("创建档案失败: {e}")))?;

        Ok(result.into_profile())
    }

    /// 通过 ID 获取档案
    pub async fn get_profile_by_id_impl(&self, id: i64) -> Result<Option<Profile>> {
        let result = Profiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询档案失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 通过邮箱获取档案
    pub async fn get_profile_by_email_impl(&self, email: &str) -> Result<Option<Profile>> {
        let result = Profiles::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询档案失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 分页列出档案
    pub async fn list_profiles_with_pagination_impl(
        &self,
        query: ProfileListQuery,
    ) -> Result<ProfileListResponse> {
        let page = query.pagination.page() as u64;
        let size = query.pagination.size() as u64;

        let mut select = Profiles::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Email.contains(&escaped))
                    .add(Column::DisplayName.contains(&escaped)),
            );
        }

        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        if let Some(ref status) = query.approval_status {
            select = select.filter(Column::ApprovalStatus.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询档案总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询档案列表失败: {e}")))?;

        Ok(ProfileListResponse {
            items: items.into_iter().map(|m| m.into_profile()).collect(),
            pagination: PaginationInfo::new(page as i64, size as i64, total as i64),
        })
    }

    /// 更新档案的非角色字段
    pub async fn update_profile_impl(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>> {
        let existing = self.get_profile_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(display_name) = update.display_name {
            model.display_name = Set(Some(display_name));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("更新档案失败: {e}")))?;

        self.get_profile_by_id_impl(id).await
    }

    /// 变更审批状态
    pub async fn set_approval_status_impl(&self, id: i64, status: ApprovalStatus) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Profiles::update_many()
            .col_expr(
                Column::ApprovalStatus,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("更新审批状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 变更全局角色
    pub async fn set_profile_role_impl(&self, id: i64, role: ProfileRole) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Profiles::update_many()
            .col_expr(
                Column::Role,
                sea_orm::sea_query::Expr::value(role.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("更新角色失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
