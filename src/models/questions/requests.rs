use serde::Deserialize;
use ts_rs::TS;

use super::entities::QuestionType;
use crate::models::common::pagination::PaginationQuery;

/// 创建题目
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct CreateQuestionRequest {
    pub course_id: Option<i64>,
    pub content: String,
    pub question_type: QuestionType,
    pub rubric: Option<String>,
    pub options: Option<Vec<String>>,
}

/// 更新题目
///
/// question_type 一旦被任何提交作答引用即不可变更。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct UpdateQuestionRequest {
    pub content: Option<String>,
    pub question_type: Option<QuestionType>,
    pub rubric: Option<String>,
    pub options: Option<Vec<String>>,
}

/// 题目列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
    // true 时只列出全局题库
    pub global_only: Option<bool>,
}
