use std::collections::BTreeMap;

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{Result, VocademyError};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::SubmissionListQuery,
        responses::SubmissionListResponse,
    },
};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::{Expr, OnConflict},
};

impl SeaOrmStorage {
    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 通过 (assignment_id, student_id) 获取提交
    pub async fn get_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出提交，student_id 为 Some 时收窄到该学生
    pub async fn list_submissions_with_pagination_impl(
        &self,
        student_id: Option<i64>,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.pagination.page() as u64;
        let size = query.pagination.size() as u64;

        let mut select = Submissions::find();

        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        select = select.order_by_desc(Column::UpdatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询提交总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(SubmissionListResponse {
            items: items.into_iter().map(|m| m.into_submission()).collect(),
            pagination: PaginationInfo::new(page as i64, size as i64, total as i64),
        })
    }

    /// 草稿合并保存
    ///
    /// 事务内完成读取、合并与写入。键级合并：本次携带的键覆盖旧值，
    /// 未携带的键原样保留。首存靠 (assignment_id, student_id) 唯一索引
    /// 上的 ON CONFLICT 兜住并发创建，输掉插入的一方重读后转入合并
    /// 路径。更新带 status = 'draft' 条件，并发提交后迟到的保存会
    /// 落到零行并显式失败。
    pub async fn merge_draft_answers_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        answers: BTreeMap<i64, String>,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| VocademyError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&txn)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询提交失败: {e}")))?;

        let row = match existing {
            None => {
                let model = ActiveModel {
                    assignment_id: Set(assignment_id),
                    student_id: Set(student_id),
                    answers: Set(serde_json::to_string(&answers)?),
                    status: Set(SubmissionStatus::Draft.to_string()),
                    submitted_at: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };

                let inserted = Submissions::insert(model)
                    .on_conflict(
                        OnConflict::columns([Column::AssignmentId, Column::StudentId])
                            .do_nothing()
                            .to_owned(),
                    )
                    .exec_without_returning(&txn)
                    .await
                    .map_err(|e| {
                        VocademyError::database_operation(format!("创建草稿失败: {e}"))
                    })?;

                let saved = Submissions::find()
                    .filter(Column::AssignmentId.eq(assignment_id))
                    .filter(Column::StudentId.eq(student_id))
                    .one(&txn)
                    .await
                    .map_err(|e| {
                        VocademyError::database_operation(format!("读取保存结果失败: {e}"))
                    })?
                    .ok_or_else(|| {
                        VocademyError::database_operation("保存后的草稿不可见".to_string())
                    })?;

                if inserted > 0 {
                    // 插入成功，本次答案已全部落库
                    txn.commit().await.map_err(|e| {
                        VocademyError::database_operation(format!("提交事务失败: {e}"))
                    })?;
                    return Ok(saved.into_submission());
                }

                // 另一次首存抢先建行，转入合并路径
                saved
            }
            Some(row) => row,
        };

        if row.status != SubmissionStatus::Draft.to_string() {
            return Err(VocademyError::submission_locked(format!(
                "submission {} is already {}",
                row.id, row.status
            )));
        }

        let mut merged =
            serde_json::from_str::<BTreeMap<i64, String>>(&row.answers).unwrap_or_default();
        merged.extend(answers);

        let result = Submissions::update_many()
            .col_expr(Column::Answers, Expr::value(serde_json::to_string(&merged)?))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(row.id))
            .filter(Column::Status.eq(SubmissionStatus::Draft.to_string()))
            .exec(&txn)
            .await
            .map_err(|e| VocademyError::database_operation(format!("保存草稿失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(VocademyError::no_rows_affected(format!(
                "draft save for submission {} affected zero rows",
                row.id
            )));
        }

        let saved = Submissions::find_by_id(row.id)
            .one(&txn)
            .await
            .map_err(|e| VocademyError::database_operation(format!("读取保存结果失败: {e}")))?
            .ok_or_else(|| {
                VocademyError::database_operation("保存后的草稿不可见".to_string())
            })?;

        txn.commit()
            .await
            .map_err(|e| VocademyError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved.into_submission())
    }

    /// draft -> submitted，单调流转
    ///
    /// 条件更新保证幂等：非 draft 行影响零行，返回 false。
    pub async fn mark_submitted_impl(&self, assignment_id: i64, student_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Submitted.to_string()),
            )
            .col_expr(Column::SubmittedAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Status.eq(SubmissionStatus::Draft.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("提交答卷失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// submitted -> graded，最终评分写入后由聚合器触发
    pub async fn mark_graded_impl(&self, submission_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Graded.to_string()),
            )
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(submission_id))
            .filter(Column::Status.ne(SubmissionStatus::Draft.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("更新提交状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
