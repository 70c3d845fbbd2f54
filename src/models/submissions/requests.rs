use std::collections::BTreeMap;

use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 草稿保存：只携带本次改动的题目，服务端按键合并
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct UpsertDraftRequest {
    pub answers: BTreeMap<i64, String>,
}

/// 提交列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub assignment_id: Option<i64>,
}
