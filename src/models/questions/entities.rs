use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题目类型
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub enum QuestionType {
    MultipleChoice, // 选择题
    ShortText,      // 简答题
    LongText,       // 论述题
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<QuestionType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的题目类型: '{s}'. 支持的类型: multiple_choice, short_text, long_text"
            ))
        })
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::ShortText => write!(f, "short_text"),
            QuestionType::LongText => write!(f, "long_text"),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(QuestionType::MultipleChoice),
            "short_text" => Ok(QuestionType::ShortText),
            "long_text" => Ok(QuestionType::LongText),
            _ => Err(format!("Invalid question type: {s}")),
        }
    }
}

/// 题目
///
/// course_id 为空表示全局共享；options 仅选择题有意义。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct Question {
    pub id: i64,
    pub course_id: Option<i64>,
    pub creator_id: i64,
    pub content: String,
    pub question_type: QuestionType,
    pub rubric: Option<String>,
    pub options: Option<Vec<String>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Question {
    pub fn is_global(&self) -> bool {
        self.course_id.is_none()
    }
}
