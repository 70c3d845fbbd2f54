use super::SeaOrmStorage;
use crate::entity::system_settings::{ActiveModel, Column, Entity as SystemSettings};
use crate::errors::{Result, VocademyError};
use crate::models::system::entities::SystemSetting;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, sea_query::OnConflict};

impl SeaOrmStorage {
    /// 读取系统设置
    pub async fn get_setting_impl(&self, key: &str) -> Result<Option<SystemSetting>> {
        let result = SystemSettings::find()
            .filter(Column::Key.eq(key))
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询系统设置失败: {e}")))?;

        Ok(result.map(|m| {
            use chrono::{DateTime, Utc};
            SystemSetting {
                key: m.key,
                value: m.value,
                updated_at: DateTime::<Utc>::from_timestamp(m.updated_at, 0).unwrap_or_default(),
            }
        }))
    }

    /// 写入系统设置，键已存在则不覆盖
    ///
    /// 引导标记只能写一次，冲突时返回 false 而不是错误。
    pub async fn set_setting_if_absent_impl(&self, key: &str, value: &str) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        let insert = SystemSettings::insert(model)
            .on_conflict(OnConflict::column(Column::Key).do_nothing().to_owned())
            .exec(&self.db)
            .await;

        match insert {
            Ok(_) => Ok(true),
            // do_nothing 命中冲突时 SeaORM 以 RecordNotInserted 上报
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(VocademyError::database_operation(format!(
                "写入系统设置失败: {e}"
            ))),
        }
    }
}
