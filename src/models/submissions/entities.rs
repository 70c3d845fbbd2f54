use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交状态。状态单调推进：draft -> submitted -> graded，没有回退路径
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Draft,     // 草稿，学生可改
    Submitted, // 已提交，等待评估
    Graded,    // 已有最终评分
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<SubmissionStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: draft, submitted, graded"
            ))
        })
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Draft => write!(f, "draft"),
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::Graded => write!(f, "graded"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(SubmissionStatus::Draft),
            "submitted" => Ok(SubmissionStatus::Submitted),
            "graded" => Ok(SubmissionStatus::Graded),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

/// 提交：一个学生对一份作业的唯一答卷
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    // question_id -> 答案文本
    pub answers: BTreeMap<i64, String>,
    pub status: SubmissionStatus,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    /// 返回作业要求但尚未非空作答的题目 ID（保持作业内顺序）
    pub fn missing_answers(&self, question_ids: &[i64]) -> Vec<i64> {
        question_ids
            .iter()
            .filter(|qid| {
                self.answers
                    .get(qid)
                    .map(|a| a.trim().is_empty())
                    .unwrap_or(true)
            })
            .copied()
            .collect()
    }
}
