use serde::{Deserialize, Serialize};
use ts_rs::TS;

// AI 评分置信度
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum ConfidenceBucket {
    Low,
    Medium,
    High,
}

impl<'de> Deserialize<'de> for ConfidenceBucket {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ConfidenceBucket>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的置信度: '{s}'. 支持的值: low, medium, high"
            ))
        })
    }
}

impl std::fmt::Display for ConfidenceBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceBucket::Low => write!(f, "low"),
            ConfidenceBucket::Medium => write!(f, "medium"),
            ConfidenceBucket::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for ConfidenceBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ConfidenceBucket::Low),
            "medium" => Ok(ConfidenceBucket::Medium),
            "high" => Ok(ConfidenceBucket::High),
            _ => Err(format!("Invalid confidence bucket: {s}")),
        }
    }
}

/// AI 评估：评分预言机对一次提交的评价，系统一次性写入
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct AiAssessment {
    pub id: i64,
    pub submission_id: i64,
    pub score: f64,
    pub feedback: String,
    pub confidence: ConfidenceBucket,
    pub request_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 最终评分结论
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub enum GradeStatus {
    Pass,
    Fail,
}

impl<'de> Deserialize<'de> for GradeStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<GradeStatus>().map_err(|_| {
            serde::de::Error::custom(format!("无效的评分结论: '{s}'. 支持的值: pass, fail"))
        })
    }
}

impl std::fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeStatus::Pass => write!(f, "pass"),
            GradeStatus::Fail => write!(f, "fail"),
        }
    }
}

impl std::str::FromStr for GradeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(GradeStatus::Pass),
            "fail" => Ok(GradeStatus::Fail),
            _ => Err(format!("Invalid grade status: {s}")),
        }
    }
}

/// 最终评分：教师写入的权威结论，覆盖 AI 评估
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct FinalGrade {
    pub id: i64,
    pub submission_id: i64,
    pub score: f64,
    pub comments: Option<String>,
    pub status: GradeStatus,
    pub grader_id: i64,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}
