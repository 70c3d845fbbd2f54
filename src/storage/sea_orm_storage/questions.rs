use super::SeaOrmStorage;
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::entity::submissions;
use crate::errors::{Result, VocademyError};
use crate::models::{
    PaginationInfo,
    questions::{
        entities::Question,
        requests::{CreateQuestionRequest, QuestionListQuery, UpdateQuestionRequest},
        responses::QuestionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建题目
    pub async fn create_question_impl(
        &self,
        creator_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<Question> {
        let now = chrono::Utc::now().timestamp();

        let options = match req.options {
            Some(ref opts) => Some(serde_json::to_string(opts)?),
            None => None,
        };

        let model = ActiveModel {
            course_id: Set(req.course_id),
            creator_id: Set(creator_id),
            content: Set(req.content),
            question_type: Set(req.question_type.to_string()),
            rubric: Set(req.rubric),
            options: Set(options),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 通过 ID 获取题目
    pub async fn get_question_by_id_impl(&self, id: i64) -> Result<Option<Question>> {
        let result = Questions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 分页列出题目
    pub async fn list_questions_with_pagination_impl(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse> {
        let page = query.pagination.page() as u64;
        let size = query.pagination.size() as u64;

        let mut select = Questions::find();

        if query.global_only.unwrap_or(false) {
            select = select.filter(Column::CourseId.is_null());
        } else if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询题目总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询题目列表失败: {e}")))?;

        Ok(QuestionListResponse {
            items: items.into_iter().map(|m| m.into_question()).collect(),
            pagination: PaginationInfo::new(page as i64, size as i64, total as i64),
        })
    }

    /// 更新题目（题型不可变规则由服务层校验）
    pub async fn update_question_impl(
        &self,
        id: i64,
        update: UpdateQuestionRequest,
    ) -> Result<Option<Question>> {
        let existing = self.get_question_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(content) = update.content {
            model.content = Set(content);
        }

        if let Some(question_type) = update.question_type {
            model.question_type = Set(question_type.to_string());
        }

        if let Some(rubric) = update.rubric {
            model.rubric = Set(Some(rubric));
        }

        if let Some(ref options) = update.options {
            model.options = Set(Some(serde_json::to_string(options)?));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("更新题目失败: {e}")))?;

        self.get_question_by_id_impl(id).await
    }

    /// 删除题目
    pub async fn delete_question_impl(&self, id: i64) -> Result<bool> {
        let result = Questions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("删除题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 是否已有提交作答引用该题目
    ///
    /// answers 列是 question_id 为键的 JSON 对象，键序列化后形如 `"42":`，
    /// 用 LIKE 匹配键串即可，无需解析全部提交。
    pub async fn question_has_answers_impl(&self, question_id: i64) -> Result<bool> {
        let key_pattern = format!("\"{question_id}\":");

        let count = submissions::Entity::find()
            .filter(submissions::Column::Answers.contains(&key_pattern))
            .count(&self.db)
            .await
            .map_err(|e| VocademyError::database_operation(format!("查询题目引用失败: {e}")))?;

        Ok(count > 0)
    }
}
